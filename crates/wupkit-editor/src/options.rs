//! Editor options and number formatting.

use serde::{Deserialize, Serialize};

/// How an edit reaches the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditStrategy {
    /// Rewrite the statements and patch the affected entities in place
    #[default]
    Patch,
    /// Rewrite the statements and re-parse the whole document
    Reparse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub strategy: EditStrategy,
    /// Maximum decimals written into rewritten statements
    pub precision: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            strategy: EditStrategy::Patch,
            precision: 3,
        }
    }
}

impl EditorOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.precision > 9 {
            return Err(format!(
                "Editor precision must be at most 9 decimals (got {})",
                self.precision
            ));
        }
        Ok(())
    }
}

/// Format a coordinate with at most `precision` decimals, trailing zeros removed
pub fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options: EditorOptions = serde_json::from_str(r#"{"strategy":"reparse"}"#).unwrap();
        assert_eq!(options.strategy, EditStrategy::Reparse);
        assert_eq!(options.precision, EditorOptions::default().precision);

        let json = serde_json::to_string(&EditorOptions::default()).unwrap();
        assert!(json.contains(r#""strategy":"patch""#));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15.5, 3), "15.5");
        assert_eq!(format_number(120.0, 3), "120");
        assert_eq!(format_number(1.23456, 3), "1.235");
        assert_eq!(format_number(-0.0001, 3), "0");
        assert_eq!(format_number(-12.26, 1), "-12.3");
        assert_eq!(format_number(2590.0, 0), "2590");
    }

    #[test]
    fn test_options_validate() {
        assert!(EditorOptions::default().validate().is_ok());
        let options = EditorOptions {
            precision: 12,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
