//! `<artifact>.provenance.json` sidecars for polygon reports.
//!
//! A sidecar ties one output file back to the sample it was derived from: the
//! sample name, how many gates landed in each budget, the run parameters and
//! the input paths, plus the build that produced it.

use anyhow::{Context, Result};
use cytogate::gates::PolygonSet;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a polygon run consumed and produced.
#[derive(Debug, Default)]
pub struct RunRecord {
    pub sample: Option<String>,
    /// Budget -> number of gates resampled to that budget.
    pub gates_per_budget: BTreeMap<usize, usize>,
    pub params: Value,
    /// Files the artifact was derived from.
    pub inputs: Vec<String>,
}

impl RunRecord {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Record the sample name and the per-budget gate counts of `set`.
    pub fn for_polygon_set(mut self, sample: impl Into<String>, set: &PolygonSet) -> Self {
        self.sample = Some(sample.into());
        self.gates_per_budget = set.iter().map(|(&b, bucket)| (b, bucket.len())).collect();
        self
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }
}

#[derive(Serialize)]
struct Callsite<'a> {
    file: &'a str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    crate_version: &'static str,
    callsite: Callsite<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<&'a str>,
    /// Keys are budgets as strings, JSON object keys.
    gates_per_budget: BTreeMap<String, usize>,
    params: &'a Value,
    inputs: &'a [String],
    output: String,
}

/// Write the sidecar next to `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, record: &RunRecord) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = provenance_path(artifact);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating provenance dir {}", parent.display()))?;
    }

    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        crate_version: cytogate::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        sample: record.sample.as_deref(),
        gates_per_budget: record
            .gates_per_budget
            .iter()
            .map(|(b, n)| (b.to_string(), *n))
            .collect(),
        params: &record.params,
        inputs: &record.inputs,
        output: artifact.to_string_lossy().into_owned(),
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "provenance sidecar");
    Ok(path)
}

/// `out/polygons.json` -> `out/polygons.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy().into_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit hash from `GIT_COMMIT` (build time, then run time), else `git rev-parse`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            output
                .status
                .success()
                .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cytogate::Vec2;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_replaces_extension() {
        let derived = provenance_path(Path::new("/tmp/output/polygons.json"));
        assert_eq!(derived, Path::new("/tmp/output/polygons.provenance.json"));
    }

    #[test]
    fn sidecar_records_sample_and_budget_counts() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("polygons.json");
        fs::write(&artifact, "{}").unwrap();

        let ring = vec![Vec2::new(0.0, 0.0); 5];
        let mut set = PolygonSet::new();
        set.entry(5).or_default().insert("Blasts".to_string(), ring.clone());
        set.entry(5).or_default().insert("T".to_string(), ring);
        set.entry(20).or_default();

        let record = RunRecord::new(json!({"polygon_points": [5, 20]}))
            .for_polygon_set("tube_01", &set)
            .with_inputs(["tube_01", "run.json"]);
        let path = write_sidecar(&artifact, &record).unwrap();

        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["sample"], "tube_01");
        assert_eq!(parsed["gates_per_budget"]["5"], 2);
        assert_eq!(parsed["gates_per_budget"]["20"], 0);
        assert_eq!(parsed["output"], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["inputs"][1], "run.json");
        assert_eq!(parsed["params"]["polygon_points"][0], 5);
    }

    #[test]
    fn sidecar_without_sample_omits_the_field() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("gates.json");
        let path = write_sidecar(&artifact, &RunRecord::new(json!({}))).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert!(parsed.get("sample").is_none());
        assert_eq!(parsed["gates_per_budget"], json!({}));
    }
}
