#![allow(dead_code)]

use relex_core::ast::{Node, Query};
use relex_core::builder::{CommandBuilder, SqlCommand};
use relex_core::compiler::{ParamCollector, SqlCompiler};
use relex_core::dialect::GenericDialect;
use relex_core::ParseError;

pub fn parse(text: &str) -> Query {
    relex_core::parse(text).unwrap_or_else(|e| panic!("Failed to parse: {text}\nError: {e}"))
}

pub fn parse_err(text: &str) -> ParseError {
    relex_core::parse(text).expect_err(&format!("Expected parse error for: {text}"))
}

pub fn parse_condition(text: &str) -> Node {
    relex_core::parse_condition(text)
        .unwrap_or_else(|e| panic!("Failed to parse condition: {text}\nError: {e}"))
}

pub fn builder() -> CommandBuilder {
    CommandBuilder::new(GenericDialect::new())
}

pub fn select(text: &str) -> SqlCommand {
    builder()
        .build_select(&parse(text))
        .unwrap_or_else(|e| panic!("Failed to build: {text}\nError: {e}"))
}

/// Compiles a condition with the generic dialect and `@p` placeholders.
pub fn compile(node: &Node) -> (Option<String>, ParamCollector) {
    let dialect = GenericDialect::new();
    let mut params = ParamCollector::new("@p");
    let sql = SqlCompiler::new(&dialect)
        .compile_condition(node, &mut params)
        .unwrap_or_else(|e| panic!("Failed to compile: {node:?}\nError: {e}"));
    (sql, params)
}

/// Verifies that writing a parsed query back to Relex and parsing it again
/// yields the same SQL and parameters, and that the written text is a
/// fixed point.
pub fn round_trip(text: &str) {
    let direct = select(text);
    let written = relex_core::write_query(&parse(text))
        .unwrap_or_else(|e| panic!("Failed to write: {text}\nError: {e}"));
    let reparsed = select(&written);
    assert_eq!(
        direct, reparsed,
        "Round-trip failed.\n  Input:    {text}\n  Written:  {written}"
    );
    let rewritten = relex_core::write_query(&parse(&written)).unwrap();
    assert_eq!(written, rewritten, "Writer is not a fixed point for: {text}");
}
