use nalgebra::Vector2;

use super::util::cross;
use crate::error::{GateError, Result};

/// Points closer than this collapse into one before hulling.
const DEDUP_EPS: f64 = 1e-12;

/// Andrew's monotone chain convex hull.
///
/// Returns the hull in CCW order starting at the lexicographically smallest
/// point, with collinear boundary points dropped. Non-finite points are
/// ignored. Fewer than 3 distinct points, or an all-collinear set, yields
/// `GateError::DegenerateHull`.
pub fn convex_hull(points: &[Vector2<f64>]) -> Result<Vec<Vector2<f64>>> {
    let mut pts: Vec<_> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    pts.sort_by(|a, b| {
        match a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
            o => o,
        }
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < DEDUP_EPS);
    if pts.len() < 3 {
        return Err(GateError::DegenerateHull { points: pts.len() });
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    if hull.len() < 3 {
        // all points on one line
        return Err(GateError::DegenerateHull { points: pts.len() });
    }
    Ok(hull)
}
