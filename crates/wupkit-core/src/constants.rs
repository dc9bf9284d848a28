//! Numeric tolerances shared across the workspace.
//!
//! All lengths are millimetres, all angles are degrees unless stated otherwise.

/// Two points closer than this are treated as the same vertex.
pub const POINT_TOLERANCE_MM: f64 = 1e-6;

/// Chords shorter than this cannot define an arc.
pub const CHORD_EPSILON_MM: f64 = 1e-9;

/// Values with a smaller magnitude are considered "not set" in scalar fields.
pub const SCALAR_EPSILON: f64 = 1e-9;

/// Tolerance band used when matching an arc sweep against the large/minor flag.
pub const ARC_SIZE_TOLERANCE_DEG: f64 = 1e-3;

/// Rotation within this distance of 90°/270° swaps a member's width and height.
pub const ROTATION_SWAP_TOLERANCE_DEG: f64 = 1.0;

/// Lower bound for the number of steps used when sampling an arc.
pub const ARC_MIN_STEPS: usize = 4;

/// Upper bound for the number of steps used when sampling an arc.
pub const ARC_MAX_STEPS: usize = 160;

/// Statement terminator of the WUP format.
pub const STATEMENT_TERMINATOR: char = ';';
