//! Path assembly from move/line/arc directives.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wupkit_core::Point2D;

use super::arc::{ArcFlag, ArcSegment, ArcSolver};

/// One directive of a routed path
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    Move(Point2D),
    Line(Point2D),
    Arc {
        to: Point2D,
        radius: f64,
        flag: ArcFlag,
    },
}

impl PathCommand {
    pub fn target(&self) -> Point2D {
        match self {
            Self::Move(p) | Self::Line(p) => *p,
            Self::Arc { to, .. } => *to,
        }
    }
}

/// Structured piece of an assembled path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathSegment {
    Line {
        start: Point2D,
        end: Point2D,
        /// Set when an arc had no solution and was replaced by this line
        fallback: bool,
    },
    Arc(ArcSegment),
}

impl PathSegment {
    pub fn start(&self) -> Point2D {
        match self {
            Self::Line { start, .. } => *start,
            Self::Arc(arc) => arc.start,
        }
    }

    pub fn end(&self) -> Point2D {
        match self {
            Self::Line { end, .. } => *end,
            Self::Arc(arc) => arc.end,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Line { fallback: true, .. })
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Line { start, end, .. } => {
                start.translate(dx, dy);
                end.translate(dx, dy);
            }
            Self::Arc(arc) => arc.translate(dx, dy),
        }
    }
}

/// Output of [`PathAssembler::assemble`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledPath {
    /// Sampled points, consecutive duplicates removed. A closed path does
    /// not repeat its first point at the end.
    pub points: Vec<Point2D>,
    pub segments: Vec<PathSegment>,
    pub closed: bool,
    /// Closed by the assembler although the last point did not return to the first
    pub force_closed: bool,
}

impl AssembledPath {
    /// Points with the first one re-appended when the path is closed
    pub fn closed_points(&self) -> Vec<Point2D> {
        let mut points = self.points.clone();
        if self.closed {
            if let Some(first) = self.points.first() {
                points.push(*first);
            }
        }
        points
    }
}

/// Turns path directives into sampled points and structured segments
pub struct PathAssembler<'a> {
    solver: &'a ArcSolver,
    tolerance: f64,
}

impl<'a> PathAssembler<'a> {
    pub fn new(solver: &'a ArcSolver, tolerance: f64) -> Self {
        Self { solver, tolerance }
    }

    pub fn assemble(&self, commands: &[PathCommand]) -> AssembledPath {
        let mut points: Vec<Point2D> = Vec::new();
        let mut segments = Vec::new();
        let mut current: Option<Point2D> = None;

        for command in commands {
            let from = match (command, current) {
                (PathCommand::Move(_), _) | (_, None) => {
                    let to = command.target();
                    points.push(to);
                    current = Some(to);
                    continue;
                }
                (_, Some(from)) => from,
            };

            match command {
                PathCommand::Move(_) => {}
                PathCommand::Line(to) => {
                    segments.push(PathSegment::Line {
                        start: from,
                        end: *to,
                        fallback: false,
                    });
                    points.push(*to);
                }
                PathCommand::Arc { to, radius, flag } => {
                    match self
                        .solver
                        .solve(from, *to, *radius, flag.direction, flag.size)
                    {
                        Some(arc) => {
                            points.extend(self.solver.sample(&arc).into_iter().skip(1));
                            segments.push(PathSegment::Arc(arc));
                        }
                        None => {
                            debug!(
                                "Arc from {} to {} with r={:.4} has no solution, using a line",
                                from, to, radius
                            );
                            segments.push(PathSegment::Line {
                                start: from,
                                end: *to,
                                fallback: true,
                            });
                            points.push(*to);
                        }
                    }
                }
            }
            current = Some(command.target());
        }

        let mut points = dedup_points(points, self.tolerance);

        let returns_to_start = points.len() >= 2
            && points
                .last()
                .is_some_and(|last| last.approx_eq(&points[0], self.tolerance));

        let mut closed = false;
        let mut force_closed = false;
        if returns_to_start {
            // An out-and-back stroke keeps its return point and stays open
            if points.len() >= 4 {
                points.pop();
                closed = true;
            }
        } else if points.len() >= 3 {
            closed = true;
            force_closed = true;
        }

        AssembledPath {
            points,
            segments,
            closed,
            force_closed,
        }
    }
}

/// Drop points that repeat their predecessor within `tolerance`
pub fn dedup_points(points: Vec<Point2D>, tolerance: f64) -> Vec<Point2D> {
    let mut result: Vec<Point2D> = Vec::with_capacity(points.len());
    for point in points {
        if result
            .last()
            .is_some_and(|last| last.approx_eq(&point, tolerance))
        {
            continue;
        }
        result.push(point);
    }
    result
}
