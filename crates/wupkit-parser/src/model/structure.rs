//! Wall, modules and framing members.

use serde::{Deserialize, Serialize};
use wupkit_core::Point3D;

/// The wall element itself. At most one per model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    /// +1 or -1, selects which face counts as positive
    pub side: i32,
    pub statement_index: usize,
}

/// Local coordinate frame active between module begin/end statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub origin: Point3D,
    pub statement_index: usize,
}

/// Kind of framing member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Stud,
    Blocking,
    Plate,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stud => write!(f, "stud"),
            Self::Blocking => write!(f, "blocking"),
            Self::Plate => write!(f, "plate"),
        }
    }
}

/// Which plate a horizontal plate member represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateRole {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A stud, blocking or plate in absolute wall coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralRect {
    pub kind: MemberKind,
    pub role: Option<PlateRole>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
    /// Rotation in degrees as written
    pub rotation: f64,
    /// Through-thickness offset, module origin applied
    pub offset: Option<f64>,
    /// Index into `WallModel::modules` when created inside a module
    pub module_index: Option<usize>,
    pub statement_index: usize,
}

impl StructuralRect {
    /// Width and height from a (length, thickness) pair.
    ///
    /// Vertical members stand on their length, horizontal ones lie on it.
    /// A rotation near 90°/270° swaps the two.
    pub fn dimensions(
        orientation: Orientation,
        length: f64,
        thickness: f64,
        rotation: f64,
        swap_tolerance_deg: f64,
    ) -> (f64, f64) {
        let (width, height) = match orientation {
            Orientation::Vertical => (thickness.abs(), length.abs()),
            Orientation::Horizontal => (length.abs(), thickness.abs()),
        };
        let quarter = (rotation.rem_euclid(180.0) - 90.0).abs();
        if quarter <= swap_tolerance_deg {
            (height, width)
        } else {
            (width, height)
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_dimensions() {
        let (w, h) = StructuralRect::dimensions(Orientation::Vertical, 2400.0, 38.0, 0.0, 1.0);
        assert_eq!((w, h), (38.0, 2400.0));
    }

    #[test]
    fn test_horizontal_dimensions_with_negative_values() {
        let (w, h) =
            StructuralRect::dimensions(Orientation::Horizontal, -1200.0, 38.0, 0.0, 1.0);
        assert_eq!((w, h), (1200.0, 38.0));
    }

    #[test]
    fn test_rotation_swaps() {
        for rotation in [90.0, -90.0, 270.0, 90.5] {
            let (w, h) =
                StructuralRect::dimensions(Orientation::Vertical, 2400.0, 38.0, rotation, 1.0);
            assert_eq!((w, h), (2400.0, 38.0), "rotation {}", rotation);
        }
        let (w, h) = StructuralRect::dimensions(Orientation::Vertical, 2400.0, 38.0, 180.0, 1.0);
        assert_eq!((w, h), (38.0, 2400.0));
    }
}
