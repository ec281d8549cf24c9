//! # relex-cli
//!
//! Command-line front end for the Relex query compiler. The binary is
//! `relex`; this library holds the pieces it is built from so they can be
//! tested without spawning a process.

pub mod config;
pub mod error;
pub mod output;

use std::collections::BTreeMap;

use relex_core::ast::{Literal, Query};
use relex_core::builder::{CommandBuilder, SqlCommand, View};
use relex_core::dialect::{GenericDialect, MsSqlDialect};
use relex_sqlite::SqliteDialect;
use tracing::{debug, warn};

pub use error::{CliError, Result};

/// SQL dialect selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DialectKind {
    /// Unquoted identifiers, `LIMIT`/`OFFSET` paging.
    #[default]
    Generic,
    /// Bracket-quoted identifiers, `TOP` paging.
    Mssql,
    /// Double-quoted identifiers, `LIMIT -1` for unbounded paging.
    Sqlite,
}

impl DialectKind {
    /// Creates a command builder for this dialect with `views` registered.
    #[must_use]
    pub fn builder(self, views: Vec<View>) -> CommandBuilder {
        let builder = match self {
            Self::Generic => CommandBuilder::new(GenericDialect::new()),
            Self::Mssql => CommandBuilder::new(MsSqlDialect::new()),
            Self::Sqlite => CommandBuilder::new(SqliteDialect::new()),
        };
        views.into_iter().fold(builder, CommandBuilder::with_view)
    }
}

/// Parses `text` and binds the given `name=value` variable bindings.
pub fn prepare_query(text: &str, bindings: &[String]) -> Result<Query> {
    let query = relex_core::parse(text).map_err(relex_core::Error::from)?;
    let values = bindings
        .iter()
        .map(|binding| config::parse_binding(binding))
        .collect::<Result<BTreeMap<String, Literal>>>()?;
    let bound = query.bind_variables(&values);
    if bound < values.len() {
        warn!(
            given = values.len(),
            bound, "some variable bindings match no variable in the query"
        );
    }
    debug!(table = %query.table.name, bound, "prepared query");
    Ok(query)
}

/// Compiles a Relex query into a SELECT, or a COUNT when `count` is set.
pub fn compile_select(
    builder: &CommandBuilder,
    text: &str,
    bindings: &[String],
    count: bool,
) -> Result<SqlCommand> {
    let query = prepare_query(text, bindings)?;
    let command = if count {
        builder.build_count(&query)?
    } else {
        builder.build_select(&query)?
    };
    Ok(command)
}

/// Compiles a Relex query into a DELETE of the matched rows.
pub fn compile_delete(builder: &CommandBuilder, text: &str, bindings: &[String]) -> Result<SqlCommand> {
    let query = prepare_query(text, bindings)?;
    Ok(builder.build_delete(&query)?)
}

/// Parses a Relex query and writes it back in canonical form.
pub fn format_query(text: &str) -> Result<String> {
    let query = relex_core::parse(text).map_err(relex_core::Error::from)?;
    Ok(relex_core::write_query(&query).map_err(relex_core::Error::from)?)
}
