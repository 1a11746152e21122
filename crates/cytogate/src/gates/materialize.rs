//! Gate materializer: event selection → outlier exclusion → scaling → hull.
//!
//! Per-gate failures (missing columns, degenerate hulls, bad classifier masks)
//! skip that gate and are logged at `debug`; they never abort the batch.

use nalgebra::Vector2;

use super::cfg::{default_outlier_predicate, OutlierFilter, PipelineCfg, SCALE_FACTOR};
use super::definition::{Gate, GateDefinition};
use super::outlier::OutlierClassifier;
use super::table::{check_aligned, EventTable, LabelTable};
use crate::error::{GateError, Result};
use crate::geom2::convex_hull;

/// Derives convex gates for one sample from a catalog of definitions.
///
/// Reads `events` and `labels` only; every gate works on its own copy of the
/// selected rows.
pub struct GateMaterializer<'a> {
    events: &'a EventTable,
    labels: &'a LabelTable,
    catalog: &'a [GateDefinition],
    classifier: Option<&'a dyn OutlierClassifier>,
    should_filter: &'a OutlierFilter,
    scale: f64,
}

impl<'a> GateMaterializer<'a> {
    /// Fails with `RowMismatch` if labels and events are not row-aligned.
    pub fn new(
        events: &'a EventTable,
        labels: &'a LabelTable,
        catalog: &'a [GateDefinition],
    ) -> Result<Self> {
        check_aligned(events, labels)?;
        Ok(Self {
            events,
            labels,
            catalog,
            classifier: None,
            should_filter: &default_outlier_predicate,
            scale: SCALE_FACTOR,
        })
    }

    pub fn from_cfg(
        events: &'a EventTable,
        labels: &'a LabelTable,
        cfg: &'a PipelineCfg,
    ) -> Result<Self> {
        let mut m = Self::new(events, labels, &cfg.gate_definitions)?;
        m.classifier = cfg.classifier.as_deref();
        m.should_filter = &*cfg.outlier_filter;
        m.scale = cfg.scale;
        Ok(m)
    }

    pub fn with_classifier(mut self, classifier: &'a dyn OutlierClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_outlier_filter(mut self, f: &'a OutlierFilter) -> Self {
        self.should_filter = f;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Materialize every definition that this sample supports, in catalog order.
    pub fn materialize_gates(&self) -> Vec<Gate> {
        let mut out = Vec::with_capacity(self.catalog.len());
        for def in self.catalog {
            match self.materialize(def) {
                Ok(gate) => out.push(gate),
                Err(err) => {
                    tracing::debug!(gate = %def.name, error = %err, "skipping gate");
                }
            }
        }
        tracing::info!(
            materialized = out.len(),
            skipped = self.catalog.len() - out.len(),
            "convex_gates"
        );
        out
    }

    /// Materialize one definition, reporting why it cannot be built.
    pub fn materialize(&self, def: &GateDefinition) -> Result<Gate> {
        for marker in [&def.x_marker, &def.y_marker] {
            if !self.events.has_column(marker) {
                return Err(missing(def, marker));
            }
        }
        let mask = self
            .labels
            .mask(&def.original_name)
            .ok_or_else(|| missing(def, &def.original_name))?;
        let mut points = self
            .events
            .select_xy(&def.x_marker, &def.y_marker, mask)
            .ok_or_else(|| missing(def, &def.x_marker))?;

        if (self.should_filter)(def) {
            if let Some(classifier) = self.classifier {
                points = drop_outliers(classifier, points)?;
            }
        }

        for p in points.iter_mut() {
            *p /= self.scale;
        }
        let polygon = convex_hull(&points)?;
        Ok(Gate::from_definition(def, polygon))
    }
}

fn drop_outliers(
    classifier: &dyn OutlierClassifier,
    points: Vec<Vector2<f64>>,
) -> Result<Vec<Vector2<f64>>> {
    let keep = classifier.non_outliers(&points);
    if keep.len() != points.len() {
        return Err(GateError::OutlierMask {
            expected: points.len(),
            got: keep.len(),
        });
    }
    Ok(points
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect())
}

fn missing(def: &GateDefinition, column: &str) -> GateError {
    GateError::MissingColumn {
        gate: def.name.clone(),
        column: column.to_string(),
    }
}
