//! Relex parser
//!
//! A hand-written recursive descent parser turning Relex text into a
//! [`Query`](crate::ast::Query).

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;
pub(crate) use parser::ARRAY_SEPARATORS;

/// Parses a Relex query.
///
/// ```rust
/// let query = relex_core::parser::parse("users(age >= 18)[id, name; name]").unwrap();
/// assert_eq!(query.table.name, "users");
/// ```
pub fn parse(input: &str) -> Result<crate::ast::Query, ParseError> {
    Parser::new(input).parse_query()
}

/// Parses a bare Relex condition.
pub fn parse_condition(input: &str) -> Result<crate::ast::Node, ParseError> {
    Parser::new(input).parse_condition()
}
