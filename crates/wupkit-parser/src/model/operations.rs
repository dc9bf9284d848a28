//! Routed cuts (PAF) and drilling operations (BOY).

use serde::{Deserialize, Serialize};
use wupkit_core::{Bounds2D, Point2D, Point3D};

use super::structure::{MemberKind, PlateRole};
use super::EditorId;
use crate::geometry::PathSegment;

/// Averaged scalar attributes of one logical cut
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CutAttributes {
    pub depth: Option<f64>,
    pub code: Option<f64>,
    pub orientation: Option<f64>,
    pub z2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleCut {
    pub center: Point2D,
    pub radius: f64,
    pub depth: Option<f64>,
    pub orientation: Option<f64>,
    pub statement_index: usize,
}

/// A polygon or polyline assembled from point/curve statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCut {
    pub points: Vec<Point2D>,
    pub path: Vec<PathSegment>,
    pub force_closed: bool,
    pub attributes: CutAttributes,
    pub statement_indices: Vec<usize>,
}

/// One piece of a routing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutingSegment {
    Circle(CircleCut),
    Polygon(PathCut),
    Polyline(PathCut),
}

impl RoutingSegment {
    pub fn statement_indices(&self) -> Vec<usize> {
        match self {
            Self::Circle(circle) => vec![circle.statement_index],
            Self::Polygon(cut) | Self::Polyline(cut) => cut.statement_indices.clone(),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Circle(circle) => circle.center.translate(dx, dy),
            Self::Polygon(cut) | Self::Polyline(cut) => {
                for point in &mut cut.points {
                    point.translate(dx, dy);
                }
                for segment in &mut cut.path {
                    segment.translate(dx, dy);
                }
            }
        }
    }

    /// Feed the segment's extent into a bounds tracker
    pub fn extend_bounds(&self, bounds: &mut Bounds2D) {
        match self {
            Self::Circle(circle) => {
                let r = circle.radius.abs();
                bounds.update(circle.center.x - r, circle.center.y - r);
                bounds.update(circle.center.x + r, circle.center.y + r);
            }
            Self::Polygon(cut) | Self::Polyline(cut) => bounds.include_points(&cut.points),
        }
    }
}

/// A routed cut operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PafRouting {
    pub editor_id: Option<EditorId>,
    pub tool: Option<f64>,
    pub face: Option<f64>,
    pub passes: Option<f64>,
    pub segments: Vec<RoutingSegment>,
    /// Header statement plus every point/curve/circle statement
    pub statement_indices: Vec<usize>,
}

impl PafRouting {
    pub fn header_index(&self) -> Option<usize> {
        self.statement_indices.first().copied()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for segment in &mut self.segments {
            segment.translate(dx, dy);
        }
    }
}

/// Drilling direction derived from the sign of the depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillDirection {
    /// Negative depth: drilled from the member's top edge
    FromTop,
    FromBottom,
}

impl DrillDirection {
    pub fn from_depth(depth: f64) -> Self {
        if depth < 0.0 {
            Self::FromTop
        } else {
            Self::FromBottom
        }
    }

    pub fn sign(&self) -> i32 {
        match self {
            Self::FromTop => -1,
            Self::FromBottom => 1,
        }
    }
}

/// Framing member a drilling belonged to when it was parsed.
///
/// Captured from parser context, never refreshed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillTarget {
    /// Index into `WallModel::structural`
    pub element_index: usize,
    pub kind: MemberKind,
    pub role: Option<PlateRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillOperation {
    pub editor_id: Option<EditorId>,
    /// X offset as written, relative to the target, module or wall
    pub local_x: f64,
    /// Through-thickness offset as written
    pub local_z: f64,
    /// Resolved absolute position
    pub position: Point3D,
    pub diameter: f64,
    pub depth: f64,
    pub direction: DrillDirection,
    pub target: Option<DrillTarget>,
    pub statement_index: usize,
}

impl DrillOperation {
    /// Move along the wall; drillings have no independent vertical parameter
    pub fn translate_x(&mut self, dx: f64) {
        self.local_x += dx;
        self.position.x += dx;
    }

    pub fn extend_bounds(&self, bounds: &mut Bounds2D) {
        let r = self.diameter.abs() / 2.0;
        bounds.update(self.position.x - r, self.position.y);
        bounds.update(self.position.x + r, self.position.y);
    }
}
