use std::collections::BTreeMap;

use nalgebra::Vector2;

use super::definition::Gate;
use crate::error::{GateError, Result};
use crate::geom2::resample;

/// `budget -> gate name -> ring with exactly budget vertices`.
pub type PolygonSet = BTreeMap<usize, BTreeMap<String, Vec<Vector2<f64>>>>;

/// Reject any budget that cannot form a closed ring.
pub fn validate_budgets(budgets: &[usize]) -> Result<()> {
    match budgets.iter().find(|&&b| b < 3) {
        Some(&budget) => Err(GateError::InvalidBudget { budget }),
        None => Ok(()),
    }
}

/// Resample every gate to every budget.
///
/// Budgets are validated before any work. Each (budget, gate) pair is
/// resampled from the gate's own polygon, so buckets never share storage.
/// Repeated budgets fold into one bucket; repeated gate names keep the last gate.
/// Gates with fewer than 3 vertices are left out of every bucket.
pub fn build_polygon_set(gates: &[Gate], budgets: &[usize]) -> Result<PolygonSet> {
    validate_budgets(budgets)?;
    let mut out: PolygonSet = budgets.iter().map(|&b| (b, BTreeMap::new())).collect();
    for gate in gates {
        for (&budget, bucket) in out.iter_mut() {
            match resample(&gate.polygon, budget) {
                Ok(ring) => {
                    bucket.insert(gate.name.clone(), ring);
                }
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(gate = %gate.name, budget, error = %err, "skipping gate");
                }
                Err(err) => return Err(err),
            }
        }
    }
    tracing::debug!(gates = gates.len(), budgets = out.len(), "polygon_set");
    Ok(out)
}
