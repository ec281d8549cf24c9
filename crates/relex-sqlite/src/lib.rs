//! # relex-sqlite
//!
//! SQLite dialect for `relex-core`.
//!
//! # How SQLite differs from the generic dialect
//!
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as the
//!   standard quoting style, though it also accepts backticks and square
//!   brackets. See [SQLite keywords].
//! - **[LIMIT]**: an `OFFSET` is only accepted after a `LIMIT`, so an
//!   offset without a count is compiled as `LIMIT -1 OFFSET n`.
//! - **Parameters**: `@p0`, `@p1`, ... are valid SQLite named parameters
//!   and can be bound by name.
//!
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//! [LIMIT]: https://www.sqlite.org/lang_select.html#limitoffset
//!
//! ## Example
//!
//! ```rust
//! use relex_core::builder::CommandBuilder;
//! use relex_sqlite::SqliteDialect;
//!
//! let query = relex_core::parse("users(age >= 18)[id, name]{20,}").unwrap();
//! let command = CommandBuilder::new(SqliteDialect::new())
//!     .build_select(&query)
//!     .unwrap();
//!
//! assert_eq!(
//!     command.text,
//!     r#"SELECT "id","name" FROM "users" WHERE "age">=@p0 LIMIT -1 OFFSET 20"#
//! );
//! ```

mod dialect;

pub use dialect::SqliteDialect;
