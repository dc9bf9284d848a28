//! Parser tuning options.

use serde::{Deserialize, Serialize};
use wupkit_core::constants;

/// Options controlling tokenization and geometry reconstruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Character that ends a statement
    pub terminator: char,
    /// Points closer than this (mm) are merged
    pub point_tolerance: f64,
    /// Chords shorter than this (mm) cannot carry an arc
    pub chord_epsilon: f64,
    /// Tolerance band (degrees) around 180° when matching the arc size flag
    pub arc_size_tolerance_deg: f64,
    /// Member rotations this close (degrees) to 90°/270° swap width and height
    pub rotation_swap_tolerance_deg: f64,
    /// Minimum number of arc sampling steps
    pub arc_min_steps: usize,
    /// Maximum number of arc sampling steps
    pub arc_max_steps: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            terminator: constants::STATEMENT_TERMINATOR,
            point_tolerance: constants::POINT_TOLERANCE_MM,
            chord_epsilon: constants::CHORD_EPSILON_MM,
            arc_size_tolerance_deg: constants::ARC_SIZE_TOLERANCE_DEG,
            rotation_swap_tolerance_deg: constants::ROTATION_SWAP_TOLERANCE_DEG,
            arc_min_steps: constants::ARC_MIN_STEPS,
            arc_max_steps: constants::ARC_MAX_STEPS,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check option consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.terminator.is_whitespace() || self.terminator == ',' {
            return Err(format!(
                "Statement terminator {:?} collides with token separators",
                self.terminator
            ));
        }
        if !self.point_tolerance.is_finite() || self.point_tolerance <= 0.0 {
            return Err("Point tolerance must be > 0".to_string());
        }
        if !self.chord_epsilon.is_finite() || self.chord_epsilon <= 0.0 {
            return Err("Chord epsilon must be > 0".to_string());
        }
        if !self.arc_size_tolerance_deg.is_finite() || self.arc_size_tolerance_deg < 0.0 {
            return Err("Arc size tolerance must be >= 0".to_string());
        }
        if !self.rotation_swap_tolerance_deg.is_finite() || self.rotation_swap_tolerance_deg < 0.0 {
            return Err("Rotation swap tolerance must be >= 0".to_string());
        }
        if self.arc_min_steps == 0 || self.arc_min_steps > self.arc_max_steps {
            return Err(format!(
                "Arc step bounds must satisfy 0 < min <= max (got {}..={})",
                self.arc_min_steps, self.arc_max_steps
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = ParserOptions::default();
        assert_eq!(options.terminator, ';');
        assert_eq!(options.arc_min_steps, 4);
        assert_eq!(options.arc_max_steps, 160);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_step_bounds() {
        let options = ParserOptions {
            arc_min_steps: 10,
            arc_max_steps: 5,
            ..ParserOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_comma_terminator_rejected() {
        let options = ParserOptions {
            terminator: ',',
            ..ParserOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
