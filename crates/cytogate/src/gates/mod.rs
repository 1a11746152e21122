//! Gate materialization and polygon normalization for one sample.
//!
//! Flow
//! - `EventTable` + `LabelTable` (+ catalog of `GateDefinition`s)
//!   → `GateMaterializer` → `Vec<Gate>` with convex rings
//!   → `build_polygon_set` → `PolygonSet` keyed by vertex budget.
//!
//! Code cross-refs: `geom2::{convex_hull, resample}`, `error::GateError`

mod cfg;
mod definition;
mod materialize;
mod outlier;
mod polygon_set;
mod sample;
mod table;

pub use cfg::{
    default_outlier_predicate, substring_predicate, OutlierFilter, PipelineCfg,
    DEFAULT_OUTLIER_SUBSTRINGS, DEFAULT_POLYGON_POINTS, SCALE_FACTOR,
};
pub use definition::{Gate, GateDefinition};
pub use materialize::GateMaterializer;
pub use outlier::{MadClassifier, OutlierClassifier, DEFAULT_Z_THRESHOLD};
pub use polygon_set::{build_polygon_set, validate_budgets, PolygonSet};
pub use sample::{FlowSample, InMemorySample};
pub use table::{EventTable, LabelTable};
