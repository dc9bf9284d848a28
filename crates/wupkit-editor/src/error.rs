//! Error types for the model editor crate.
//!
//! A failed edit never touches the current model snapshot.

use thiserror::Error;
use wupkit_parser::{EditorId, ParseError};

/// Errors that can occur during editor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// No entity carries the requested editor id.
    #[error("No entity with editor id {0}")]
    EntityNotFound(EditorId),

    /// The statement index is past the end of the statement list.
    #[error("Statement index out of range: {index} (statements: {len})")]
    StatementOutOfRange { index: usize, len: usize },

    /// The statement was deleted earlier.
    #[error("Statement {0} has been deleted")]
    StatementMissing(usize),

    /// The statement text cannot be rewritten.
    #[error("Statement {index} cannot be rewritten: {reason}")]
    MalformedStatement { index: usize, reason: String },

    /// Re-parsing the edited statements failed.
    #[error("Re-parse failed: {0}")]
    Parse(#[from] ParseError),
}

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

impl From<EditorError> for wupkit_core::Error {
    fn from(err: EditorError) -> Self {
        wupkit_core::Error::other(err.to_string())
    }
}
