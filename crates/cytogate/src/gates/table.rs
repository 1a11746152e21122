//! Column-oriented event and label tables for one sample.
//!
//! Both tables are built once per sample and only read afterwards. Column
//! names are expected to be canonical already (renaming happens in the loader).

use nalgebra::Vector2;

use crate::error::{GateError, Result};

/// Named numeric marker columns, one row per event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl EventTable {
    /// Build from `(name, values)` pairs. Repeated names keep the first column.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = EventTable::default();
        for (name, values) in columns {
            let name = name.into();
            if table.names.contains(&name) {
                continue;
            }
            if table.names.is_empty() {
                table.n_rows = values.len();
            } else if values.len() != table.n_rows {
                return Err(GateError::RowMismatch {
                    column: name,
                    expected: table.n_rows,
                    got: values.len(),
                });
            }
            table.names.push(name);
            table.columns.push(values);
        }
        Ok(table)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }

    /// Copy the `(x, y)` projection of every row where `mask` is set.
    ///
    /// Returns `None` if either column is absent.
    pub fn select_xy(&self, x: &str, y: &str, mask: &[bool]) -> Option<Vec<Vector2<f64>>> {
        let xs = self.column(x)?;
        let ys = self.column(y)?;
        Some(
            xs.iter()
                .zip(ys)
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|((&x, &y), _)| Vector2::new(x, y))
                .collect(),
        )
    }
}

/// Gate membership matrix aligned row-for-row with an `EventTable`.
///
/// Invariant: column names are unique; the first occurrence of a repeated name
/// wins at construction time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelTable {
    names: Vec<String>,
    masks: Vec<Vec<bool>>,
    n_rows: usize,
}

impl LabelTable {
    /// Build from numeric 0/1 columns; a row is a member iff its value is exactly 1.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        Self::from_masks(
            columns
                .into_iter()
                .map(|(name, values)| (name, values.into_iter().map(|v| v == 1.0).collect())),
        )
    }

    /// Build from boolean membership columns.
    pub fn from_masks<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<bool>)>,
        S: Into<String>,
    {
        let mut table = LabelTable::default();
        for (name, mask) in columns {
            let name = name.into();
            if table.names.contains(&name) {
                continue;
            }
            if table.names.is_empty() {
                table.n_rows = mask.len();
            } else if mask.len() != table.n_rows {
                return Err(GateError::RowMismatch {
                    column: name,
                    expected: table.n_rows,
                    got: mask.len(),
                });
            }
            table.names.push(name);
            table.masks.push(mask);
        }
        Ok(table)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn gate_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[inline]
    pub fn has_gate(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn mask(&self, name: &str) -> Option<&[bool]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.masks[idx])
    }

    /// Number of member events of `name` (0 if absent).
    pub fn count(&self, name: &str) -> usize {
        self.mask(name)
            .map(|m| m.iter().filter(|&&b| b).count())
            .unwrap_or(0)
    }
}

/// Check that labels line up with events. Empty tables align with anything.
pub(crate) fn check_aligned(events: &EventTable, labels: &LabelTable) -> Result<()> {
    if events.width() == 0 || labels.width() == 0 || events.n_rows() == labels.n_rows() {
        return Ok(());
    }
    Err(GateError::RowMismatch {
        column: labels.names[0].clone(),
        expected: events.n_rows(),
        got: labels.n_rows(),
    })
}
