//! # relex-core
//!
//! A schema-less query toolkit: build or parse abstract queries, then
//! compile them into dialect-specific, parameterized SQL.
//!
//! This crate provides:
//! - A query expression model (tables, condition trees, fields, sorting,
//!   paging, late-bound variables)
//! - Relex, a compact textual query language, with a hand-written lexer, a
//!   recursive descent parser and a writer for the reverse direction
//! - A SQL expression compiler that never inlines literals
//! - A conditional string template engine and a command builder that
//!   assembles SELECT/INSERT/UPDATE/DELETE statements, optionally batched
//!
//! ## Relex to SQL
//!
//! ```rust
//! use relex_core::builder::CommandBuilder;
//! use relex_core::dialect::GenericDialect;
//!
//! let query = relex_core::parse(r#"users(age >= 18 and name like "A%")[id, name; name]{0,10}"#)
//!     .unwrap();
//! let command = CommandBuilder::new(GenericDialect::new())
//!     .build_select(&query)
//!     .unwrap();
//!
//! assert_eq!(
//!     command.text,
//!     "SELECT id,name FROM users WHERE (age>=@p0) And (name LIKE @p1) ORDER BY name ASC LIMIT 10"
//! );
//! assert_eq!(command.parameters.len(), 2);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Every literal becomes a numbered parameter:
//!
//! ```rust
//! use relex_core::ast::{field, Query};
//! use relex_core::builder::CommandBuilder;
//! use relex_core::dialect::GenericDialect;
//!
//! let user_input = "'; DROP TABLE users; --";
//! let query = Query::new("users").filter(field("name").eq(user_input)).select(["id"]);
//! let command = CommandBuilder::new(GenericDialect::new())
//!     .build_select(&query)
//!     .unwrap();
//!
//! assert_eq!(command.text, "SELECT id FROM users WHERE name=@p0");
//! ```

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod template;
pub mod writer;

pub use ast::{field, Node, Query, Value, Variable};
pub use builder::{CommandBatch, CommandBuilder, SqlCommand, View};
pub use compiler::{ParamCollector, Parameter, ParameterSink, SqlCompiler};
pub use dialect::{Dialect, GenericDialect, MsSqlDialect};
pub use error::{Error, Result};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse, parse_condition, ParseError, Parser};
pub use template::{Resolved, StringTemplate};
pub use writer::{write_condition, write_query};
