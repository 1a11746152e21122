//! Error taxonomy for gate materialization and polygon resampling.
//!
//! Per-gate variants (`MissingColumn`, `DegenerateHull`, `OutlierMask`) are
//! local: the materializer logs them and skips the gate. `InvalidBudget` and
//! `RowMismatch` reject the whole request.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// A marker or label column referenced by a gate definition is absent.
    #[error("missing column `{column}` for gate `{gate}`")]
    MissingColumn { gate: String, column: String },

    /// Fewer than 3 distinct, non-collinear points.
    #[error("degenerate hull: {points} usable point(s)")]
    DegenerateHull { points: usize },

    /// Requested vertex budget cannot form a closed ring.
    #[error("invalid vertex budget {budget}: must be at least 3")]
    InvalidBudget { budget: usize },

    /// Classifier returned a mask that does not line up with its input.
    #[error("outlier mask has {got} entries for {expected} points")]
    OutlierMask { expected: usize, got: usize },

    /// Column lengths disagree within a table or across event/label tables.
    #[error("row count mismatch in `{column}`: expected {expected}, got {got}")]
    RowMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
}

impl GateError {
    /// Local failures skip a single gate; everything else aborts the call.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GateError::MissingColumn { .. }
                | GateError::DegenerateHull { .. }
                | GateError::OutlierMask { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
