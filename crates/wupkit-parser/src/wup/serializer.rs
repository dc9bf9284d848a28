//! Statement list back to text.

/// Returned when neither statements nor source text remain
pub const EMPTY_DOCUMENT_MARKER: &str = "(empty)";

/// Join the surviving statements, one per line, each with its terminator.
///
/// Deleted (`None`) and blank entries are skipped. An empty result falls
/// back to `source`, then to [`EMPTY_DOCUMENT_MARKER`].
pub fn serialize(statements: &[Option<String>], source: &str, terminator: char) -> String {
    let lines: Vec<String> = statements
        .iter()
        .filter_map(|s| s.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}{}", s, terminator))
        .collect();

    if !lines.is_empty() {
        lines.join("\n")
    } else if !source.trim().is_empty() {
        source.to_string()
    } else {
        EMPTY_DOCUMENT_MARKER.to_string()
    }
}
