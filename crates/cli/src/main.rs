use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cytogate::api::{FlowSample, PolygonSet};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod loader;
mod provenance;

use config::RunConfig;
use loader::TableSample;
use provenance::{write_sidecar, RunRecord};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Derive fixed-size gate polygons from flow-cytometry samples")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the polygon set of one sample and write it as JSON
    Polygons {
        /// Sample directory (events/labels tables, optional gates.json, meta.json)
        #[arg(long)]
        sample: PathBuf,
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the materialized convex gates of one sample
    Gates {
        #[arg(long)]
        sample: PathBuf,
        #[arg(long)]
        config: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Polygons {
            sample,
            config,
            out,
        } => polygons(&sample, &config, &out, cmd.tag),
        Action::Gates { sample, config } => gates(&sample, &config),
        Action::Report => report(cmd.tag),
    }
}

#[derive(Serialize)]
struct PolygonReport<'a> {
    sample: &'a str,
    file: &'a str,
    budgets: BTreeMap<usize, BTreeMap<&'a str, Vec<[f64; 2]>>>,
}

impl<'a> PolygonReport<'a> {
    fn new(sample: &'a dyn FlowSample, set: &'a PolygonSet) -> Self {
        let budgets = set
            .iter()
            .map(|(&budget, bucket)| {
                let rings: BTreeMap<&str, Vec<[f64; 2]>> = bucket
                    .iter()
                    .map(|(name, ring)| {
                        let pts = ring.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>();
                        (name.as_str(), pts)
                    })
                    .collect();
                (budget, rings)
            })
            .collect();
        Self {
            sample: sample.sample_name(),
            file: sample.sample_file_name(),
            budgets,
        }
    }
}

fn load(sample: &Path, config: &Path) -> Result<(TableSample, RunConfig)> {
    let run = RunConfig::load(config)?;
    let s = TableSample::load(sample, &run.marker_aliases, &run.gate_aliases)
        .with_context(|| format!("loading sample {}", sample.display()))?;
    Ok((s, run))
}

fn polygons(sample: &Path, config: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(sample = %sample.display(), out = %out.display(), tag = ?tag, "polygons");
    let (s, run) = load(sample, config)?;
    let set = s.polygon_gates(&run.to_pipeline())?;
    for (budget, bucket) in &set {
        tracing::info!(budget, gates = bucket.len(), "budget");
    }

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let report = PolygonReport::new(&s, &set);
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let record = RunRecord::new(serde_json::json!({
        "tag": tag,
        "polygon_points": run.polygon_points,
        "scale": run.scale,
        "outlier_handler": run.outlier_handler,
        "gate_definitions": run.gate_definitions.len(),
    }))
    .for_polygon_set(s.sample_name(), &set)
    .with_inputs([
        sample.to_string_lossy().into_owned(),
        config.to_string_lossy().into_owned(),
    ]);
    write_sidecar(out, &record)?;
    Ok(())
}

fn gates(sample: &Path, config: &Path) -> Result<()> {
    let (s, run) = load(sample, config)?;
    let convex = s.convex_gates(&run.to_pipeline())?;
    let rows: Vec<_> = convex
        .iter()
        .map(|g| {
            serde_json::json!({
                "name": g.name,
                "original_name": g.original_name,
                "parent_name": g.parent_name,
                "x_marker": g.x_marker,
                "y_marker": g.y_marker,
                "vertices": g.n_vertices(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "crate_version": cytogate::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
