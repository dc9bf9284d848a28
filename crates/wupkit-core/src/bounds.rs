//! Running 2D bounds accumulator.

use crate::data::Point2D;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box accumulated while parsing.
///
/// Starts inverted (`min > max`) so the first update defines the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds2D {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds2D {
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
        }
    }

    /// Grow the box to include `(x, y)`. Non-finite input is ignored.
    pub fn update(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn include_point(&mut self, point: &Point2D) {
        self.update(point.x, point.y);
    }

    pub fn include_points<'a>(&mut self, points: impl IntoIterator<Item = &'a Point2D>) {
        for point in points {
            self.include_point(point);
        }
    }

    /// Include the rectangle spanned by `(x, y)` and `(x + width, y + height)`.
    pub fn include_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.update(x, y);
        self.update(x + width, y + height);
    }

    /// True once at least one finite point has been seen.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    pub fn contains(&self, x: f64, y: f64, tolerance: f64) -> bool {
        x >= self.min_x - tolerance
            && x <= self.max_x + tolerance
            && y >= self.min_y - tolerance
            && y <= self.max_y + tolerance
    }

    pub fn width(&self) -> f64 {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bounds_are_invalid() {
        assert!(!Bounds2D::new().is_valid());
        assert_eq!(Bounds2D::new().width(), 0.0);
    }

    #[test]
    fn test_single_point_is_valid() {
        let mut bounds = Bounds2D::new();
        bounds.update(5.0, -3.0);
        assert!(bounds.is_valid());
        assert_eq!(bounds.min_x, 5.0);
        assert_eq!(bounds.max_y, -3.0);
    }

    #[test]
    fn test_include_rect_and_contains() {
        let mut bounds = Bounds2D::new();
        bounds.include_rect(100.0, 0.0, 38.0, 2400.0);
        assert_eq!(bounds.max_x, 138.0);
        assert_eq!(bounds.max_y, 2400.0);
        assert!(bounds.contains(120.0, 1200.0, 0.0));
        assert!(!bounds.contains(99.0, 1200.0, 0.0));
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let mut bounds = Bounds2D::new();
        bounds.update(f64::NAN, 1.0);
        bounds.update(1.0, f64::INFINITY);
        assert!(!bounds.is_valid());
    }
}
