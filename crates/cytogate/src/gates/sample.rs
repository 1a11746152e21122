//! Sample capability interface.
//!
//! One implementation per source format (the `cli` crate ships a CSV/Parquet
//! loader). The derived operations, `convex_gates` and `polygon_gates`, are
//! provided here and do not depend on which loader backs the sample.

use super::cfg::PipelineCfg;
use super::definition::Gate;
use super::materialize::GateMaterializer;
use super::polygon_set::{build_polygon_set, validate_budgets, PolygonSet};
use super::table::{EventTable, LabelTable};
use crate::error::Result;

pub trait FlowSample {
    /// Experiment name recorded in the source metadata.
    fn sample_name(&self) -> &str;
    fn sample_file_name(&self) -> &str;
    fn events(&self) -> &EventTable;
    fn gate_labels(&self) -> &LabelTable;
    /// Gates drawn in the source file itself (may be empty).
    fn gates(&self) -> Vec<Gate>;

    fn convex_gates(&self, cfg: &PipelineCfg) -> Result<Vec<Gate>> {
        let m = GateMaterializer::from_cfg(self.events(), self.gate_labels(), cfg)?;
        Ok(m.materialize_gates())
    }

    fn polygon_gates(&self, cfg: &PipelineCfg) -> Result<PolygonSet> {
        validate_budgets(&cfg.polygon_points)?;
        let gates = self.convex_gates(cfg)?;
        build_polygon_set(&gates, &cfg.polygon_points)
    }
}

/// A sample held fully in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySample {
    pub name: String,
    pub file_name: String,
    pub events: EventTable,
    pub labels: LabelTable,
    pub drawn_gates: Vec<Gate>,
}

impl InMemorySample {
    pub fn new(name: impl Into<String>, events: EventTable, labels: LabelTable) -> Self {
        let name = name.into();
        Self {
            file_name: name.clone(),
            name,
            events,
            labels,
            drawn_gates: Vec::new(),
        }
    }
}

impl FlowSample for InMemorySample {
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
        self.drawn_gates.clone()
    }
}
