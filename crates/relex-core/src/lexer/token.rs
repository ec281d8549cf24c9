//! Token types for the Relex lexer.

use super::Span;

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Words and constants
    /// Identifier-like word (e.g., `users`, `u.name`, `and`, `like`).
    Name(String),
    /// Double-quoted constant with `""` unescaped (e.g., `"Anna"`).
    Quoted(String),
    /// Unquoted constant led by a digit, dot or dash (e.g., `42`, `-1.5`).
    Constant(String),

    // Comparison operators
    /// `=` or `==`
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `!`
    Bang,

    // Connectives
    /// `&&` or `&`
    And,
    /// `||` or `|`
    Or,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// :
    Colon,
    /// *
    Star,

    // Special
    /// End of input
    Eof,
    /// Invalid input
    Error(String),
}

impl TokenKind {
    /// Returns true if this is the given word, compared case-insensitively.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Self::Name(name) if name.eq_ignore_ascii_case(word))
    }
}

/// A token with its span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
