//! Geometry reconstruction: arc solving and path assembly

pub mod arc;
pub mod path;

pub use arc::{solve_arc, ArcDirection, ArcFlag, ArcSegment, ArcSize, ArcSolver};
pub use path::{dedup_points, AssembledPath, PathAssembler, PathCommand, PathSegment};
