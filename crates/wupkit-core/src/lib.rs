//! # WupKit Core
//!
//! Core types shared by every WupKit crate:
//! - 2D/3D points in millimetres
//! - The running bounds accumulator fed while parsing
//! - Numeric tolerances used by the geometry code
//! - The crate-wide error type

pub mod bounds;
pub mod constants;
pub mod data;
pub mod error;

pub use bounds::Bounds2D;
pub use data::{Point2D, Point3D};
pub use error::{Error, Result};
