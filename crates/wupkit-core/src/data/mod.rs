//! Point types in wall coordinates
//!
//! X runs along the wall, Y runs up the wall, Z runs through the wall thickness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A point in the wall plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// True when both coordinates are within `tolerance` of each other
    pub fn approx_eq(&self, other: &Point2D, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }

    /// Shift the point in place
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A point with a through-thickness component
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Drop the through-thickness component
    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl Add for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_approx_eq() {
        let a = Point2D::new(1.0, 1.0);
        let b = Point2D::new(1.0 + 1e-9, 1.0);
        assert!(a.approx_eq(&b, 1e-6));
        assert!(!a.approx_eq(&Point2D::new(1.1, 1.0), 1e-6));
    }

    #[test]
    fn test_point3d_add_and_xy() {
        let p = Point3D::new(1.0, 2.0, 3.0) + Point3D::new(10.0, 20.0, 30.0);
        assert_eq!(p, Point3D::new(11.0, 22.0, 33.0));
        assert_eq!(p.xy(), Point2D::new(11.0, 22.0));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Point2D::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
    }
}
