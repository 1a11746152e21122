//! Pipeline defaults and the explicit per-run configuration.
//!
//! Policy
//! - Everything the materializer and polygon-set builder depend on is passed
//!   in through `PipelineCfg`; there is no process-wide state.

use super::definition::GateDefinition;
use super::outlier::OutlierClassifier;

/// Event coordinates are divided by this before hulling.
pub const SCALE_FACTOR: f64 = 4.5;

/// Vertex budgets used when a run does not request any.
pub const DEFAULT_POLYGON_POINTS: &[usize] = &[20];

/// Populations known to carry stray events in their projections.
pub const DEFAULT_OUTLIER_SUBSTRINGS: &[&str] = &["Blasts", "CD19"];

/// Predicate deciding whether a gate goes through outlier exclusion.
pub type OutlierFilter = dyn Fn(&GateDefinition) -> bool;

/// Default predicate: `original_name` contains one of `DEFAULT_OUTLIER_SUBSTRINGS`.
pub fn default_outlier_predicate(def: &GateDefinition) -> bool {
    DEFAULT_OUTLIER_SUBSTRINGS
        .iter()
        .any(|s| def.original_name.contains(s))
}

/// Case-sensitive substring predicate over `original_name`.
pub fn substring_predicate(needles: Vec<String>) -> impl Fn(&GateDefinition) -> bool {
    move |def: &GateDefinition| needles.iter().any(|s| def.original_name.contains(s.as_str()))
}

/// Inputs of one `convex_gates` / `polygon_gates` run.
pub struct PipelineCfg {
    pub gate_definitions: Vec<GateDefinition>,
    /// `None` disables outlier exclusion.
    pub classifier: Option<Box<dyn OutlierClassifier>>,
    pub outlier_filter: Box<OutlierFilter>,
    pub scale: f64,
    pub polygon_points: Vec<usize>,
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            gate_definitions: Vec::new(),
            classifier: None,
            outlier_filter: Box::new(default_outlier_predicate),
            scale: SCALE_FACTOR,
            polygon_points: DEFAULT_POLYGON_POINTS.to_vec(),
        }
    }
}

impl PipelineCfg {
    pub fn new(gate_definitions: Vec<GateDefinition>) -> Self {
        Self {
            gate_definitions,
            ..Self::default()
        }
    }

    pub fn with_classifier(mut self, classifier: impl OutlierClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    pub fn with_outlier_filter(mut self, f: impl Fn(&GateDefinition) -> bool + 'static) -> Self {
        self.outlier_filter = Box::new(f);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_polygon_points(mut self, points: Vec<usize>) -> Self {
        self.polygon_points = points;
        self
    }
}

impl std::fmt::Debug for PipelineCfg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineCfg")
            .field("gate_definitions", &self.gate_definitions.len())
            .field("classifier", &self.classifier.is_some())
            .field("scale", &self.scale)
            .field("polygon_points", &self.polygon_points)
            .finish()
    }
}
