//! Parser error types.

use core::fmt;

use crate::lexer::{Span, TokenKind};

/// Characters of context shown on each side of the error position.
const EXCERPT_RADIUS: usize = 20;

/// A Relex parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// The full input text.
    pub input: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span, input: &str) -> Self {
        Self {
            message: message.into(),
            span,
            input: String::from(input),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: &str, found: &TokenKind, span: Span, input: &str) -> Self {
        let message = match found {
            TokenKind::Eof => format!("Unexpected end of input: expected {expected}"),
            TokenKind::Error(reason) => reason.clone(),
            other => format!("Unexpected token: expected {expected}, found {other:?}"),
        };
        Self::new(message, span, input)
    }

    /// Returns the text surrounding the error position.
    #[must_use]
    pub fn context(&self) -> &str {
        self.span.excerpt(&self.input, EXCERPT_RADIUS)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {}: `{}`",
            self.message,
            self.span.start,
            self.context()
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_shows_position_and_context() {
        let err = ParseError::new("Unknown operator", Span::new(9, 13), "users(id like 1)[*]");
        let text = err.to_string();
        assert!(text.starts_with("Unknown operator at position 9"));
        assert!(text.contains("id like 1"));
    }

    #[test]
    fn test_unexpected_eof_message() {
        let err = ParseError::unexpected("']'", &TokenKind::Eof, Span::new(5, 5), "users");
        assert_eq!(err.message, "Unexpected end of input: expected ']'");
    }
}
