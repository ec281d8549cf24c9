//! Relex lexer
//!
//! A hand-written lexer that classifies Relex input into names, quoted and
//! unquoted constants, and punctuation.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
