//! Table-file sample loader (CSV or Parquet) backed by polars.
//!
//! Sample directory layout
//! - `events.csv` | `events.parquet`: one numeric column per marker.
//! - `labels.csv` | `labels.parquet`: one 0/1 column per gate, row-aligned.
//! - `gates.json` (optional): gates drawn in the source, `[{name, parent_name,
//!   x_marker, y_marker, polygon: [[x, y], ...]}]`.
//! - `meta.json` (optional): `{"exp_name": "..."}`.

use anyhow::{anyhow, Context, Result};
use cytogate::api::{EventTable, FlowSample, Gate, LabelTable};
use cytogate::Vec2;
use polars::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Suffix polars appends to repeated CSV header names.
const DUPLICATE_MARK: &str = "_duplicated_";

#[derive(Debug, Deserialize)]
struct DrawnGate {
    name: String,
    parent_name: String,
    x_marker: String,
    y_marker: String,
    polygon: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    exp_name: String,
}

/// A sample stored as a directory of table files.
#[derive(Debug)]
pub struct TableSample {
    name: String,
    file_name: String,
    events: EventTable,
    labels: LabelTable,
    drawn: Vec<Gate>,
}

impl TableSample {
    /// Load a sample directory, renaming columns through the alias maps.
    pub fn load(
        dir: &Path,
        marker_aliases: &BTreeMap<String, String>,
        gate_aliases: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let file_name = dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample".to_string());

        let events_path = find_table(dir, "events")?;
        let events = EventTable::from_columns(renamed(
            frame_columns(&read_frame(&events_path)?)?,
            marker_aliases,
        ))
        .with_context(|| format!("building event table from {}", events_path.display()))?;

        let labels_path = find_table(dir, "labels")?;
        let labels = LabelTable::from_columns(renamed(
            frame_columns(&read_frame(&labels_path)?)?,
            gate_aliases,
        ))
        .with_context(|| format!("building label table from {}", labels_path.display()))?;

        let drawn = read_drawn_gates(&dir.join("gates.json"), marker_aliases, gate_aliases)?;
        let name = read_meta(&dir.join("meta.json"))?.unwrap_or_else(|| file_name.clone());

        tracing::info!(
            sample = %name,
            events = events.n_rows(),
            markers = events.width(),
            gates = labels.width(),
            "loaded sample"
        );
        Ok(Self {
            name,
            file_name,
            events,
            labels,
            drawn,
        })
    }
}

impl FlowSample for TableSample {
    fn sample_name(&self) -> &str {
        &self.name
    }
    fn sample_file_name(&self) -> &str {
        &self.file_name
    }
    fn events(&self) -> &EventTable {
        &self.events
    }
    fn gate_labels(&self) -> &LabelTable {
        &self.labels
    }
    fn gates(&self) -> Vec<Gate> {
        self.drawn.clone()
    }
}

fn find_table(dir: &Path, stem: &str) -> Result<PathBuf> {
    ["parquet", "csv"]
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.exists())
        .ok_or_else(|| anyhow!("no {stem}.csv or {stem}.parquet in {}", dir.display()))
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let lf = if path.extension().is_some_and(|e| e == "parquet") {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    lf.collect()
        .with_context(|| format!("reading {}", path.display()))
}

/// Numeric columns as `f64` in file order; nulls become NaN. Repeated headers
/// are dropped so the first occurrence wins.
fn frame_columns(df: &DataFrame) -> Result<Vec<(String, Vec<f64>)>> {
    let mut out = Vec::with_capacity(df.width());
    for series in df.iter() {
        let name = series.name().to_string();
        if is_repeated_header(&name) {
            continue;
        }
        let cast = series
            .cast(&DataType::Float64)
            .with_context(|| format!("column `{name}` is not numeric"))?;
        let values: Vec<f64> = cast
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        out.push((name, values));
    }
    Ok(out)
}

/// `<name>_duplicated_<n>`: the form polars gives the later copies of a header.
fn is_repeated_header(name: &str) -> bool {
    name.rsplit_once(DUPLICATE_MARK).is_some_and(|(base, n)| {
        !base.is_empty() && !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())
    })
}

fn renamed(
    columns: Vec<(String, Vec<f64>)>,
    aliases: &BTreeMap<String, String>,
) -> Vec<(String, Vec<f64>)> {
    columns
        .into_iter()
        .map(|(name, values)| (alias(&name, aliases), values))
        .collect()
}

fn alias(name: &str, aliases: &BTreeMap<String, String>) -> String {
    aliases.get(name).cloned().unwrap_or_else(|| name.to_string())
}

fn read_drawn_gates(
    path: &Path,
    marker_aliases: &BTreeMap<String, String>,
    gate_aliases: &BTreeMap<String, String>,
) -> Result<Vec<Gate>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let drawn: Vec<DrawnGate> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(drawn
        .into_iter()
        .map(|g| {
            let name = alias(&g.name, gate_aliases);
            Gate {
                original_name: name.clone(),
                name,
                parent_name: alias(&g.parent_name, gate_aliases),
                x_marker: alias(&g.x_marker, marker_aliases),
                y_marker: alias(&g.y_marker, marker_aliases),
                polygon: g.polygon.iter().map(|&[x, y]| Vec2::new(x, y)).collect(),
            }
        })
        .collect())
}

fn read_meta(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let meta: Meta =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(meta.exp_name))
}
