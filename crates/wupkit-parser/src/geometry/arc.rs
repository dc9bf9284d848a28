//! Circular arc recovery from chord, radius and direction/size flag.
//!
//! Two circles of a given radius pass through any two distinct points whose
//! distance is at most the diameter. The flag token picks one of them: its
//! sign gives the rotational direction, its remainder selects the large or
//! minor arc.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use tracing::{trace, warn};
use wupkit_core::Point2D;

use crate::options::ParserOptions;

/// Rotational direction of an arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

/// Which of the two possible arcs is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcSize {
    /// Sweep of at most 180°
    Minor,
    /// Sweep of more than 180°
    Large,
}

/// Direction/size marker of a curve statement, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcFlag {
    pub raw: String,
    pub direction: ArcDirection,
    pub size: ArcSize,
}

impl Default for ArcFlag {
    fn default() -> Self {
        Self {
            raw: "+0".to_string(),
            direction: ArcDirection::CounterClockwise,
            size: ArcSize::Minor,
        }
    }
}

impl ArcFlag {
    /// Interpret a flag token. Returns `None` for an empty token.
    ///
    /// A leading `-` selects clockwise. The rest selects the large arc when it
    /// is a number `>= 1` or contains `L`/`G`.
    pub fn parse(token: &str) -> Option<Self> {
        let raw = token.trim();
        if raw.is_empty() {
            return None;
        }

        let direction = if raw.starts_with('-') {
            ArcDirection::Clockwise
        } else {
            ArcDirection::CounterClockwise
        };

        let rest = raw.trim_start_matches(['+', '-']);
        let size = match rest.parse::<f64>() {
            Ok(value) if value >= 1.0 => ArcSize::Large,
            Ok(_) => ArcSize::Minor,
            Err(_) => {
                let upper = rest.to_ascii_uppercase();
                if upper.contains('L') || upper.contains('G') {
                    ArcSize::Large
                } else {
                    ArcSize::Minor
                }
            }
        };

        Some(Self {
            raw: raw.to_string(),
            direction,
            size,
        })
    }

    pub fn is_clockwise(&self) -> bool {
        self.direction == ArcDirection::Clockwise
    }
}

/// A solved circular arc. Angles are radians, measured from the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub start: Point2D,
    pub end: Point2D,
    pub center: Point2D,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Signed sweep, negative when clockwise
    pub sweep: f64,
    pub clockwise: bool,
}

impl ArcSegment {
    /// Point on the arc at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point2D {
        let angle = self.start_angle + self.sweep * t;
        Point2D::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start.translate(dx, dy);
        self.end.translate(dx, dy);
        self.center.translate(dx, dy);
    }
}

/// Normalize an angle into `[0, 2π)`
fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Arc solver with the tolerances taken from the parser options
#[derive(Debug, Clone)]
pub struct ArcSolver {
    chord_epsilon: f64,
    size_tolerance: f64,
    min_steps: usize,
    max_steps: usize,
}

impl Default for ArcSolver {
    fn default() -> Self {
        Self::new(&ParserOptions::default())
    }
}

impl ArcSolver {
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            chord_epsilon: options.chord_epsilon,
            size_tolerance: options.arc_size_tolerance_deg.to_radians(),
            min_steps: options.arc_min_steps.max(1),
            max_steps: options.arc_max_steps.max(options.arc_min_steps.max(1)),
        }
    }

    /// Find the arc from `start` to `end` with the given radius.
    ///
    /// Returns `None` for a degenerate chord or when the radius is shorter
    /// than half the chord. Callers fall back to a straight segment.
    pub fn solve(
        &self,
        start: Point2D,
        end: Point2D,
        radius: f64,
        direction: ArcDirection,
        size: ArcSize,
    ) -> Option<ArcSegment> {
        let chord = start.distance_to(&end);
        if !chord.is_finite() || chord < self.chord_epsilon {
            trace!("Arc rejected: degenerate chord {:.3e}", chord);
            return None;
        }

        let radius = radius.abs();
        let half = chord / 2.0;
        if !radius.is_finite() || radius + self.chord_epsilon < half {
            trace!(
                "Arc rejected: radius {:.4} shorter than half chord {:.4}",
                radius,
                half
            );
            return None;
        }

        let offset = (radius * radius - half * half).max(0.0).sqrt();
        let mid = Point2D::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
        let delta = end - start;
        let ux = delta.x / chord;
        let uy = delta.y / chord;
        let candidates = [
            Point2D::new(mid.x - uy * offset, mid.y + ux * offset),
            Point2D::new(mid.x + uy * offset, mid.y - ux * offset),
        ];

        let clockwise = direction == ArcDirection::Clockwise;
        let mut fallback: Option<(Point2D, f64, f64, f64)> = None;

        for center in candidates {
            let start_angle = (start.y - center.y).atan2(start.x - center.x);
            let end_angle = (end.y - center.y).atan2(end.x - center.x);
            let sweep = if clockwise {
                normalize_angle(start_angle - end_angle)
            } else {
                normalize_angle(end_angle - start_angle)
            };

            if sweep <= self.chord_epsilon {
                continue;
            }

            let matches = match size {
                ArcSize::Large => sweep > PI - self.size_tolerance,
                ArcSize::Minor => sweep <= PI + self.size_tolerance,
            };

            if matches {
                return Some(self.build(
                    start,
                    end,
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    sweep,
                    clockwise,
                ));
            }

            if fallback.is_none() {
                fallback = Some((center, start_angle, end_angle, sweep));
            }
        }

        // Neither center matched the size flag: keep the first usable one.
        let (center, start_angle, end_angle, sweep) = fallback?;
        warn!(
            "No arc candidate matched {:?} sweep from {} to {}; using first candidate",
            size, start, end
        );
        Some(self.build(
            start,
            end,
            center,
            radius,
            start_angle,
            end_angle,
            sweep,
            clockwise,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        start: Point2D,
        end: Point2D,
        center: Point2D,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        unsigned_sweep: f64,
        clockwise: bool,
    ) -> ArcSegment {
        let sweep = if clockwise {
            -unsigned_sweep
        } else {
            unsigned_sweep
        };
        trace!(
            "Arc: from={} to={} center={} r={:.4} sweep={:.2}°",
            start,
            end,
            center,
            radius,
            sweep.to_degrees()
        );
        ArcSegment {
            start,
            end,
            center,
            radius,
            start_angle,
            end_angle,
            sweep,
            clockwise,
        }
    }

    /// Number of sampling steps for a sweep: more for larger sweeps.
    pub fn steps_for(&self, sweep: f64) -> usize {
        let share = (sweep.abs() / TAU).min(1.0);
        let steps = (share * self.max_steps as f64).ceil() as usize;
        steps.clamp(self.min_steps, self.max_steps)
    }

    /// Discretize the arc. The first and last points are the exact endpoints.
    pub fn sample(&self, arc: &ArcSegment) -> Vec<Point2D> {
        let steps = self.steps_for(arc.sweep);
        let mut points = Vec::with_capacity(steps + 1);
        points.push(arc.start);
        for step in 1..steps {
            points.push(arc.point_at(step as f64 / steps as f64));
        }
        points.push(arc.end);
        points
    }
}

/// Solve an arc with default tolerances
pub fn solve_arc(
    start: Point2D,
    end: Point2D,
    radius: f64,
    direction: ArcDirection,
    size: ArcSize,
) -> Option<ArcSegment> {
    ArcSolver::default().solve(start, end, radius, direction, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn test_flag_parsing() {
        let flag = ArcFlag::parse("-0").unwrap();
        assert_eq!(flag.direction, ArcDirection::Clockwise);
        assert_eq!(flag.size, ArcSize::Minor);
        assert_eq!(flag.raw, "-0");

        let flag = ArcFlag::parse("+1").unwrap();
        assert_eq!(flag.direction, ArcDirection::CounterClockwise);
        assert_eq!(flag.size, ArcSize::Large);

        let flag = ArcFlag::parse("-G").unwrap();
        assert!(flag.is_clockwise());
        assert_eq!(flag.size, ArcSize::Large);

        assert!(ArcFlag::parse("  ").is_none());
    }

    #[test]
    fn test_minor_ccw_arc_below_chord() {
        let solver = ArcSolver::default();
        let arc = solver
            .solve(
                Point2D::new(0.0, 0.0),
                Point2D::new(10.0, 0.0),
                10.0,
                ArcDirection::CounterClockwise,
                ArcSize::Minor,
            )
            .unwrap();
        assert!(!arc.clockwise);
        assert!(arc.sweep > 0.0 && arc.sweep <= PI);
        assert_close(arc.center.x, 5.0);
        assert!(arc.center.y > 0.0);
        assert_close(arc.sweep.to_degrees(), 60.0);
    }

    #[test]
    fn test_large_cw_arc() {
        let solver = ArcSolver::default();
        let arc = solver
            .solve(
                Point2D::new(0.0, 0.0),
                Point2D::new(10.0, 0.0),
                10.0,
                ArcDirection::Clockwise,
                ArcSize::Large,
            )
            .unwrap();
        assert!(arc.clockwise);
        assert!(arc.sweep < -PI);
        assert_close(arc.sweep.to_degrees(), -300.0);
    }

    #[test]
    fn test_semicircle_both_sizes() {
        let solver = ArcSolver::default();
        for size in [ArcSize::Minor, ArcSize::Large] {
            let arc = solver
                .solve(
                    Point2D::new(0.0, 0.0),
                    Point2D::new(20.0, 0.0),
                    10.0,
                    ArcDirection::CounterClockwise,
                    size,
                )
                .unwrap();
            assert_close(arc.center.x, 10.0);
            assert_close(arc.center.y, 0.0);
            assert_close(arc.sweep.abs(), PI);
        }
    }

    #[test]
    fn test_radius_too_small_has_no_solution() {
        let result = solve_arc(
            Point2D::new(0.0, 0.0),
            Point2D::new(30.0, 0.0),
            10.0,
            ArcDirection::Clockwise,
            ArcSize::Minor,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_zero_chord_has_no_solution() {
        let p = Point2D::new(4.0, 4.0);
        assert!(solve_arc(p, p, 5.0, ArcDirection::Clockwise, ArcSize::Minor).is_none());
    }

    #[test]
    fn test_sampling_hits_exact_endpoints() {
        let solver = ArcSolver::default();
        let start = Point2D::new(0.1, 0.2);
        let end = Point2D::new(7.3, -1.9);
        let arc = solver
            .solve(start, end, 6.0, ArcDirection::Clockwise, ArcSize::Large)
            .unwrap();
        let points = solver.sample(&arc);
        assert_eq!(points.first(), Some(&start));
        assert_eq!(points.last(), Some(&end));
        assert!(points.len() > 5);
    }

    #[test]
    fn test_step_count_bounds() {
        let solver = ArcSolver::default();
        assert_eq!(solver.steps_for(1e-4), 4);
        assert_eq!(solver.steps_for(TAU), 160);
        assert!(solver.steps_for(PI) > solver.steps_for(PI / 4.0));
    }
}
