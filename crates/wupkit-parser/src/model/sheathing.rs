//! Sheathing panels and nail rows.

use serde::{Deserialize, Serialize};
use wupkit_core::Point2D;

use super::EditorId;

/// Wall face a sheathing panel (and the nail rows after it) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Outer,
    Inner,
}

impl Layer {
    /// +1 for the outer face, -1 for the inner face
    pub fn face_direction(&self) -> i32 {
        match self {
            Self::Outer => 1,
            Self::Inner => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheathingPanel {
    pub layer: Layer,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub origin: Point2D,
    pub offset: Option<f64>,
    pub rotation: f64,
    pub material: Option<String>,
    pub face: i32,
    /// Boundary points from trailing point statements
    pub points: Vec<Point2D>,
    /// Header statement followed by every absorbed point statement
    pub statement_indices: Vec<usize>,
}

/// A line of fasteners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NailRow {
    pub editor_id: Option<EditorId>,
    pub start: Point2D,
    pub end: Point2D,
    pub spacing: Option<f64>,
    pub gauge: Option<f64>,
    pub layer: Option<Layer>,
    pub statement_index: usize,
}

impl NailRow {
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start.translate(dx, dy);
        self.end.translate(dx, dy);
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Number of fasteners along the row when a spacing is known
    pub fn nail_count(&self) -> Option<usize> {
        let spacing = self.spacing.filter(|s| *s > 0.0)?;
        Some((self.length() / spacing).floor() as usize + 1)
    }
}
