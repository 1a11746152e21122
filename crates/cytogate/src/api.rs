//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the `cli` crate
//!   and experiments. Breaking changes are allowed and expected.

// 2D geometry
pub use crate::geom2::rand::{draw_event_cloud, CloudCfg, ReplayToken};
pub use crate::geom2::{
    contains_point, convex_hull, decimate, densify, polygon_area, resample, triangle_area,
};
// Gates
pub use crate::gates::{
    build_polygon_set, default_outlier_predicate, substring_predicate, validate_budgets,
    EventTable, FlowSample, Gate, GateDefinition, GateMaterializer, InMemorySample, LabelTable,
    MadClassifier, OutlierClassifier, PipelineCfg, PolygonSet, DEFAULT_OUTLIER_SUBSTRINGS,
    DEFAULT_POLYGON_POINTS, DEFAULT_Z_THRESHOLD, SCALE_FACTOR,
};
pub use crate::error::GateError;
