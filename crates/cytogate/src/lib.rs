//! Gate polygon derivation for flow-cytometry samples.
//!
//! Pipeline
//! - `gates::GateMaterializer`: per gate definition, select member events,
//!   optionally drop outliers, scale, and take the convex hull.
//! - `gates::build_polygon_set`: resample every materialized hull to each
//!   requested vertex budget.
//! - `geom2`: the hull builder and the polygon resampler behind both steps.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; prefer the
//!   curated re-exports in `api` and `prelude`.

pub mod api;
pub mod error;
pub mod gates;
pub mod geom2;

pub use error::{GateError, Result};
pub use nalgebra::Vector2 as Vec2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{GateError, Result};
    pub use crate::gates::{
        build_polygon_set, default_outlier_predicate, EventTable, FlowSample, Gate,
        GateDefinition, GateMaterializer, InMemorySample, LabelTable, MadClassifier,
        OutlierClassifier, PipelineCfg, PolygonSet, SCALE_FACTOR,
    };
    pub use crate::geom2::{convex_hull, resample, triangle_area};
    pub use nalgebra::Vector2 as Vec2;
}
