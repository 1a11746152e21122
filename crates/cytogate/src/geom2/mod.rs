//! 2D polygon geometry for gate boundaries (vertex representation).
//!
//! Purpose
//! - Build convex hulls of scaled event projections and resample them to a
//!   fixed vertex count.
//! - Keep polygons as plain `Vec<Vector2<f64>>` rings: no closing duplicate,
//!   winding as produced by the hull (counter-clockwise).
//!
//! Code cross-refs: `gates::GateMaterializer`, `gates::build_polygon_set`

mod hull;
pub mod rand;
mod resample;
mod util;

pub use hull::convex_hull;
pub use resample::{decimate, densify, resample};
pub use util::{contains_point, cross, polygon_area, triangle_area};

#[cfg(test)]
mod tests;
