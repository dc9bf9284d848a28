//! Context threaded through one parse call.

use wupkit_core::constants::SCALAR_EPSILON;

use crate::geometry::PathCommand;
use crate::model::{CutAttributes, Layer, RoutingSegment};

/// Where a point statement goes.
///
/// An open sheathing panel wins over an open routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveContext {
    Panel(usize),
    Routing,
    None,
}

/// Per-vertex scalar samples of one path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarSamples {
    depth: Vec<f64>,
    code: Vec<f64>,
    orientation: Vec<f64>,
    z2: Vec<f64>,
}

/// Depth sample of a single vertex.
///
/// When both fields carry a value the smaller magnitude is used.
pub fn depth_sample(depth: Option<f64>, z2: Option<f64>) -> Option<f64> {
    let significant = |v: Option<f64>| v.filter(|v| v.abs() > SCALAR_EPSILON);
    match (significant(depth), significant(z2)) {
        (Some(d), Some(z)) => Some(if z.abs() < d.abs() { z } else { d }),
        (Some(d), None) => Some(d),
        (None, Some(z)) => Some(z),
        (None, None) => None,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl ScalarSamples {
    pub fn push(
        &mut self,
        depth: Option<f64>,
        code: Option<f64>,
        orientation: Option<f64>,
        z2: Option<f64>,
    ) {
        if let Some(d) = depth_sample(depth, z2) {
            self.depth.push(d);
        }
        self.code.extend(code);
        self.orientation.extend(orientation);
        self.z2.extend(z2);
    }

    /// Collapse the samples into the attributes of one logical cut.
    ///
    /// Depth is averaged by magnitude and takes the sign of the first sample.
    pub fn reduce(&self) -> CutAttributes {
        let depth = self.depth.first().map(|first| {
            let magnitude =
                self.depth.iter().map(|d| d.abs()).sum::<f64>() / self.depth.len() as f64;
            if *first < 0.0 {
                -magnitude
            } else {
                magnitude
            }
        });
        CutAttributes {
            depth,
            code: mean(&self.code),
            orientation: mean(&self.orientation),
            z2: mean(&self.z2),
        }
    }
}

/// Open path inside a routing
#[derive(Debug, Clone, Default)]
pub struct PathAccumulator {
    pub commands: Vec<PathCommand>,
    pub samples: ScalarSamples,
    pub statement_indices: Vec<usize>,
}

impl PathAccumulator {
    pub fn has_current_point(&self) -> bool {
        !self.commands.is_empty()
    }
}

/// Routing whose segments are still being collected
#[derive(Debug, Clone)]
pub struct RoutingInProgress {
    pub header_index: usize,
    pub header_command: String,
    pub header_numbers: Vec<f64>,
    pub header_body: String,
    pub tool: Option<f64>,
    pub face: Option<f64>,
    pub passes: Option<f64>,
    pub segments: Vec<RoutingSegment>,
    pub statement_indices: Vec<usize>,
    pub path: Option<PathAccumulator>,
}

/// Mutable context owned by a single parse call
#[derive(Debug, Default)]
pub struct ParserState {
    /// Index into `WallModel::modules`
    pub active_module: Option<usize>,
    /// Index into `WallModel::panels`
    pub active_panel: Option<usize>,
    pub active_routing: Option<RoutingInProgress>,
    /// Index into `WallModel::structural`
    pub last_structural: Option<usize>,
    /// Layer of the most recent sheathing header
    pub current_layer: Option<Layer>,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_target(&self) -> ActiveContext {
        match (self.active_panel, &self.active_routing) {
            (Some(panel), _) => ActiveContext::Panel(panel),
            (None, Some(_)) => ActiveContext::Routing,
            (None, None) => ActiveContext::None,
        }
    }

    /// Leave the active module frame
    pub fn end_module(&mut self) {
        self.active_module = None;
        self.last_structural = None;
    }
}
