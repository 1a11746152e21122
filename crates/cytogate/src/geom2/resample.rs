//! Fixed-count polygon resampling.
//!
//! - `densify`: split the longest edge at its midpoint until the ring has
//!   `target` vertices.
//! - `decimate`: drop the vertex whose neighbor triangle has the smallest area
//!   until the ring has `target` vertices.
//!
//! Ties resolve to the lowest index in both directions, so results are
//! deterministic for symmetric inputs. Densify then decimate back to the
//! original count does not in general reproduce the original ring.

use nalgebra::Vector2;

use super::util::triangle_area;
use crate::error::{GateError, Result};

/// Resample a ring (≥ 3 vertices) to exactly `target` vertices.
///
/// Returns the input unchanged when it already has `target` vertices.
pub fn resample(ring: &[Vector2<f64>], target: usize) -> Result<Vec<Vector2<f64>>> {
    if target < 3 {
        return Err(GateError::InvalidBudget { budget: target });
    }
    if ring.len() < 3 {
        return Err(GateError::DegenerateHull { points: ring.len() });
    }
    let mut out = ring.to_vec();
    if out.len() < target {
        densify(&mut out, target);
    } else if out.len() > target {
        decimate(&mut out, target);
    }
    Ok(out)
}

/// Insert edge midpoints until `ring.len() == target`. No-op if already at or above.
pub fn densify(ring: &mut Vec<Vector2<f64>>, target: usize) {
    if ring.is_empty() {
        return;
    }
    ring.reserve(target.saturating_sub(ring.len()));
    while ring.len() < target {
        let n = ring.len();
        let mut best = 0usize;
        let mut best_len = f64::NEG_INFINITY;
        for i in 0..n {
            let len = (ring[(i + 1) % n] - ring[i]).norm();
            if len > best_len {
                best_len = len;
                best = i;
            }
        }
        let mid = (ring[best] + ring[(best + 1) % n]) * 0.5;
        ring.insert(best + 1, mid);
    }
}

/// Remove minimum-area vertices until `ring.len() == target`.
///
/// Stops at 3 vertices regardless of `target`; callers validate budgets.
pub fn decimate(ring: &mut Vec<Vector2<f64>>, target: usize) {
    let floor = target.max(3);
    while ring.len() > floor {
        let n = ring.len();
        let mut best = 0usize;
        let mut best_area = f64::INFINITY;
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let area = triangle_area(prev, ring[i], next);
            if area < best_area {
                best_area = area;
                best = i;
            }
        }
        ring.remove(best);
    }
}
