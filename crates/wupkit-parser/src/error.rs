//! Error types for the WUP parser.
//!
//! Only two conditions reject a whole document. Malformed or misplaced
//! statements are never errors; they end up in `WallModel::unhandled`.

use thiserror::Error;

/// Fatal parse errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input has no statements at all.
    #[error("WUP input is empty")]
    EmptyInput,

    /// A full pass produced no finite coordinates.
    #[error("No geometry found in {statements} statements")]
    NoGeometry { statements: usize },
}

/// Result type alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

impl From<ParseError> for wupkit_core::Error {
    fn from(err: ParseError) -> Self {
        wupkit_core::Error::other(err.to_string())
    }
}
