use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Static description of a derived gate, independent of any sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDefinition {
    pub name: String,
    /// Label-table column holding the membership of this gate.
    pub original_name: String,
    pub parent_name: String,
    pub x_marker: String,
    pub y_marker: String,
}

impl GateDefinition {
    pub fn new(
        name: impl Into<String>,
        original_name: impl Into<String>,
        parent_name: impl Into<String>,
        x_marker: impl Into<String>,
        y_marker: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            original_name: original_name.into(),
            parent_name: parent_name.into(),
            x_marker: x_marker.into(),
            y_marker: y_marker.into(),
        }
    }
}

/// A gate with a concrete boundary ring over `(x_marker, y_marker)`.
///
/// For convex gates the ring is the hull in its native CCW order, in scaled
/// coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    pub name: String,
    pub original_name: String,
    pub parent_name: String,
    pub x_marker: String,
    pub y_marker: String,
    pub polygon: Vec<Vector2<f64>>,
}

impl Gate {
    pub fn from_definition(def: &GateDefinition, polygon: Vec<Vector2<f64>>) -> Self {
        Self {
            name: def.name.clone(),
            original_name: def.original_name.clone(),
            parent_name: def.parent_name.clone(),
            x_marker: def.x_marker.clone(),
            y_marker: def.y_marker.clone(),
            polygon,
        }
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.polygon.len()
    }
}
