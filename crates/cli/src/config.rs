//! Run configuration (JSON).
//!
//! Mirrors one data-creation run: which derived gates to build, the polygon
//! vertex budgets, the coordinate scale and the outlier handler. Alias maps
//! canonicalize marker and gate column names at load time.

use anyhow::{bail, Context, Result};
use cytogate::api::{
    substring_predicate, validate_budgets, GateDefinition, MadClassifier, PipelineCfg,
    DEFAULT_OUTLIER_SUBSTRINGS, DEFAULT_POLYGON_POINTS, DEFAULT_Z_THRESHOLD, SCALE_FACTOR,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub gate_definitions: Vec<GateDefinition>,

    /// Vertex budgets for the polygon set (e.g., [20, 40])
    #[serde(default = "default_polygon_points")]
    pub polygon_points: Vec<usize>,

    /// Event coordinates are divided by this before hulling
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Absent: no outlier exclusion
    #[serde(default)]
    pub outlier_handler: Option<OutlierHandlerConfig>,

    /// Raw marker column name -> canonical name
    #[serde(default)]
    pub marker_aliases: BTreeMap<String, String>,

    /// Raw gate column name -> canonical name
    #[serde(default)]
    pub gate_aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutlierHandlerConfig {
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f64,

    /// Gates whose original name contains any of these go through exclusion
    #[serde(default = "default_substrings")]
    pub substrings: Vec<String>,
}

impl Default for OutlierHandlerConfig {
    fn default() -> Self {
        Self {
            z_threshold: default_z_threshold(),
            substrings: default_substrings(),
        }
    }
}

fn default_polygon_points() -> Vec<usize> {
    DEFAULT_POLYGON_POINTS.to_vec()
}

fn default_scale() -> f64 {
    SCALE_FACTOR
}

fn default_z_threshold() -> f64 {
    DEFAULT_Z_THRESHOLD
}

fn default_substrings() -> Vec<String> {
    DEFAULT_OUTLIER_SUBSTRINGS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: RunConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        validate_budgets(&self.polygon_points)?;
        if !(self.scale.is_finite() && self.scale > 0.0) {
            bail!("scale must be a positive finite number, got {}", self.scale);
        }
        if let Some(h) = &self.outlier_handler {
            if !(h.z_threshold.is_finite() && h.z_threshold > 0.0) {
                bail!("z_threshold must be positive, got {}", h.z_threshold);
            }
        }
        Ok(())
    }

    /// Build the explicit pipeline inputs for one run.
    pub fn to_pipeline(&self) -> PipelineCfg {
        let mut cfg = PipelineCfg::new(self.gate_definitions.clone())
            .with_scale(self.scale)
            .with_polygon_points(self.polygon_points.clone());
        if let Some(h) = &self.outlier_handler {
            cfg = cfg
                .with_classifier(MadClassifier::new(h.z_threshold))
                .with_outlier_filter(substring_predicate(h.substrings.clone()));
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"{
        "gate_definitions": [
            {"name": "Blasts", "original_name": "Blasts", "parent_name": "CD45+",
             "x_marker": "CD45", "y_marker": "SSC-A"}
        ]
    }"#;

    #[test]
    fn defaults_apply() {
        let cfg: RunConfig = serde_json::from_str(MINIMAL).unwrap();
        assert_eq!(cfg.polygon_points, vec![20]);
        assert_eq!(cfg.scale, 4.5);
        assert!(cfg.outlier_handler.is_none());
        assert!(cfg.marker_aliases.is_empty());
        let p = cfg.to_pipeline();
        assert!(p.classifier.is_none());
        assert_eq!(p.gate_definitions[0].x_marker, "CD45");
    }

    #[test]
    fn outlier_handler_defaults_to_known_substrings() {
        let raw = r#"{"gate_definitions": [], "outlier_handler": {}}"#;
        let cfg: RunConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.outlier_handler, Some(OutlierHandlerConfig::default()));
        let h = cfg.outlier_handler.unwrap();
        assert_eq!(h.substrings, vec!["Blasts", "CD19"]);
        assert_eq!(h.z_threshold, 3.5);
    }

    #[test]
    fn load_rejects_small_budgets_and_bad_scale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"gate_definitions": [], "polygon_points": [20, 2]}"#).unwrap();
        let err = RunConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid vertex budget 2"));

        std::fs::write(&path, r#"{"gate_definitions": [], "scale": 0.0}"#).unwrap();
        assert!(RunConfig::load(&path).is_err());

        std::fs::write(&path, MINIMAL).unwrap();
        assert_eq!(RunConfig::load(&path).unwrap().gate_definitions.len(), 1);
    }
}
