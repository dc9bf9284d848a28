//! Coordinate resolution against modules and framing members.

use wupkit_core::{Point2D, Point3D};

use crate::model::{DrillDirection, Module, StructuralRect};

/// Origin of the active module, or the wall origin
pub fn frame_origin(module: Option<&Module>) -> Point3D {
    module.map(|m| m.origin).unwrap_or_default()
}

/// Module-relative (x, y) to absolute
pub fn resolve_xy(module: Option<&Module>, x: f64, y: f64) -> Point2D {
    frame_origin(module).xy() + Point2D::new(x, y)
}

/// Module-relative through-thickness offset to absolute
pub fn resolve_offset(module: Option<&Module>, offset: Option<f64>) -> Option<f64> {
    offset.map(|o| o + frame_origin(module).z)
}

/// Absolute position of a drilling.
///
/// Relative to the target member when there is one, else to the module
/// origin, else already absolute.
pub fn resolve_drill(
    target: Option<&StructuralRect>,
    module: Option<&Module>,
    local_x: f64,
    local_z: f64,
    depth: f64,
) -> Point3D {
    match (target, module) {
        (Some(rect), _) => {
            let y = match DrillDirection::from_depth(depth) {
                DrillDirection::FromTop => rect.y + rect.height,
                DrillDirection::FromBottom => rect.y,
            };
            Point3D::new(
                rect.x + local_x,
                y,
                rect.offset.unwrap_or(0.0) + local_z,
            )
        }
        (None, Some(module)) => module.origin + Point3D::new(local_x, 0.0, local_z),
        (None, None) => Point3D::new(local_x, 0.0, local_z),
    }
}
