//! Statement splitting and token extraction.

use regex::Regex;
use std::sync::OnceLock;

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("valid number regex"))
}

/// True when the whole token is a signed decimal number
pub fn is_numeric_token(token: &str) -> bool {
    number_regex().is_match(token.trim())
}

/// Parse a token that is a signed decimal number
pub fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim();
    if !is_numeric_token(token) {
        return None;
    }
    token.parse::<f64>().ok()
}

/// Split raw text into trimmed, non-empty statements.
///
/// The terminator is dropped. Spacing inside each statement is kept.
pub fn split_statements(text: &str, terminator: char) -> Vec<String> {
    text.split(terminator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A single statement split into command word and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    text: &'a str,
    command: &'a str,
    body_offset: usize,
}

impl<'a> Statement<'a> {
    pub fn parse(text: &'a str) -> Self {
        let lead = text.len() - text.trim_start().len();
        let rest = &text[lead..];
        let command_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        Self {
            text,
            command: &rest[..command_len],
            body_offset: lead + command_len,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn command(&self) -> &'a str {
        self.command
    }

    /// Everything after the command word, untrimmed
    pub fn body(&self) -> &'a str {
        &self.text[self.body_offset..]
    }

    /// Statement text up to the start of the body
    pub fn head(&self) -> &'a str {
        &self.text[..self.body_offset]
    }

    /// Every numeric token, left to right. Non-numeric tokens are skipped.
    pub fn numbers(&self) -> Vec<f64> {
        self.body()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .filter_map(parse_number)
            .collect()
    }

    /// Byte ranges of the body tokens, relative to the body.
    ///
    /// Commas and whitespace both separate tokens. A comma piece with
    /// nothing in it is kept as an empty token so positions stay stable.
    fn token_spans(&self) -> Vec<(usize, usize)> {
        let body = self.body();
        if body.trim().is_empty() {
            return Vec::new();
        }

        let mut spans = Vec::new();
        let mut offset = 0;
        for piece in body.split(',') {
            let before = spans.len();
            let mut start = None;
            for (i, c) in piece.char_indices() {
                match (c.is_whitespace(), start) {
                    (false, None) => start = Some(i),
                    (true, Some(s)) => {
                        spans.push((offset + s, offset + i));
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(s) = start {
                spans.push((offset + s, offset + piece.len()));
            }
            if spans.len() == before {
                spans.push((offset, offset));
            }
            offset += piece.len() + 1;
        }
        spans
    }

    /// Body tokens, kept verbatim
    pub fn tokens(&self) -> Vec<&'a str> {
        let body = self.body();
        self.token_spans()
            .into_iter()
            .map(|(start, end)| &body[start..end])
            .collect()
    }

    /// First token that is not a number (material labels)
    pub fn first_text_token(&self) -> Option<&'a str> {
        self.body()
            .split(|c: char| c == ',' || c.is_whitespace())
            .find(|t| !t.is_empty() && !is_numeric_token(t))
    }

    /// Rebuild the statement with some tokens replaced.
    ///
    /// Everything outside the replaced tokens is kept byte for byte.
    /// Returns `None` when an index has no token.
    pub fn rewrite_tokens(&self, replacements: &[(usize, String)]) -> Option<String> {
        let spans = self.token_spans();
        let mut edits = Vec::with_capacity(replacements.len());
        for (index, value) in replacements {
            let span = *spans.get(*index)?;
            edits.push((span, value.as_str()));
        }
        edits.sort_by_key(|((start, _), _)| *start);

        let body = self.body();
        let mut out = String::with_capacity(self.text.len() + 8);
        out.push_str(self.head());
        let mut cursor = 0;
        for ((start, end), value) in edits {
            if start < cursor {
                continue;
            }
            out.push_str(&body[cursor..start]);
            out.push_str(value);
            cursor = end;
        }
        out.push_str(&body[cursor..]);
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_statements() {
        let statements = split_statements("ELM 1200,2400;\n  QS  2400, 38 ;;  ; ", ';');
        assert_eq!(statements, vec!["ELM 1200,2400", "QS  2400, 38"]);
    }

    #[test]
    fn test_numeric_tokens() {
        assert!(is_numeric_token("12"));
        assert!(is_numeric_token("-12.5"));
        assert!(is_numeric_token("+.5"));
        assert!(is_numeric_token("3."));
        assert!(!is_numeric_token("1e3"));
        assert!(!is_numeric_token("OSB"));
        assert!(!is_numeric_token("-"));
        assert_eq!(parse_number(" -0.25 "), Some(-0.25));
        assert_eq!(parse_number("12mm"), None);
    }

    #[test]
    fn test_statement_parts() {
        let statement = Statement::parse("PLA 1250,2400, 12,0,0,0 OSB");
        assert_eq!(statement.command(), "PLA");
        assert_eq!(statement.head(), "PLA");
        assert_eq!(statement.numbers(), vec![1250.0, 2400.0, 12.0, 0.0, 0.0, 0.0]);
        assert_eq!(statement.first_text_token(), Some("OSB"));

        let bare = Statement::parse("ENDMODUL");
        assert_eq!(bare.command(), "ENDMODUL");
        assert_eq!(bare.body(), "");
        assert!(bare.tokens().is_empty());
    }

    #[test]
    fn test_tokens_keep_flags() {
        let statement = Statement::parse("KB 100,200,50,-10,-0,");
        assert_eq!(statement.tokens(), vec!["100", "200", "50", "-10", "-0", ""]);

        let spaced = Statement::parse("NR 0 10  20 30");
        assert_eq!(spaced.tokens(), vec!["0", "10", "20", "30"]);

        let mixed = Statement::parse("NR 0 10, 20 30,, 150");
        assert_eq!(mixed.tokens(), vec!["0", "10", "20", "30", "", "150"]);
        assert_eq!(mixed.numbers(), vec![0.0, 10.0, 20.0, 30.0, 150.0]);
    }

    #[test]
    fn test_rewrite_preserves_layout() {
        let statement = Statement::parse("KB 100, 200,50,-10,-L");
        let rewritten = statement
            .rewrite_tokens(&[(0, "110".to_string()), (1, "195.5".to_string())])
            .unwrap();
        assert_eq!(rewritten, "KB 110, 195.5,50,-10,-L");

        let spaced = Statement::parse("NR 0 10  20 30");
        let rewritten = spaced
            .rewrite_tokens(&[(3, "35".to_string()), (0, "5".to_string())])
            .unwrap();
        assert_eq!(rewritten, "NR 5 10  20 35");

        let mixed = Statement::parse("NR 0 10, 20 30, 150");
        let rewritten = mixed
            .rewrite_tokens(&[(1, "12.5".to_string()), (2, "25".to_string())])
            .unwrap();
        assert_eq!(rewritten, "NR 0 12.5, 25 30, 150");

        assert!(statement.rewrite_tokens(&[(9, "1".to_string())]).is_none());
    }
}
