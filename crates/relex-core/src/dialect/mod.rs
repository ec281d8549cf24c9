//! SQL Dialect support.
//!
//! Different databases quote identifiers and page results differently. This
//! module provides a trait for dialect-specific behavior consumed by the
//! SQL compiler and the command builder.

mod generic;
mod mssql;

pub use generic::GenericDialect;
pub use mssql::MsSqlDialect;

/// Default SELECT template, paging with `LIMIT`/`OFFSET`.
pub const SELECT_TEMPLATE: &str = "SELECT @columns FROM @table@where[ WHERE {0}]@groupby[ GROUP BY {0}]@orderby[ ORDER BY {0}]@recordcount[ LIMIT {0}]@recordoffset[ OFFSET {0}]";

/// Default INSERT template.
pub const INSERT_TEMPLATE: &str = "INSERT INTO @table (@columns) VALUES (@values)";

/// Default UPDATE template.
pub const UPDATE_TEMPLATE: &str = "UPDATE @table SET @set@where[ WHERE {0}]";

/// Default DELETE template.
pub const DELETE_TEMPLATE: &str = "DELETE FROM @table@where[ WHERE {0}]";

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the opening and closing identifier quote characters, or
    /// `None` if identifiers are emitted as-is.
    fn identifier_quotes(&self) -> Option<(char, char)> {
        None
    }

    /// Quotes one identifier segment. `*` is never quoted; a closing quote
    /// inside the name is doubled.
    fn quote_identifier(&self, name: &str) -> String {
        match self.identifier_quotes() {
            Some((open, close)) if name != "*" => {
                let escaped = name.replace(close, &format!("{close}{close}"));
                format!("{open}{escaped}{close}")
            }
            _ => String::from(name),
        }
    }

    /// Returns the prefix of numbered parameter placeholders.
    fn parameter_prefix(&self) -> &'static str {
        "@p"
    }

    /// Returns the LIMIT value meaning "no limit", used when only an offset
    /// is requested. `None` omits the LIMIT clause.
    fn unbounded_limit(&self) -> Option<&'static str> {
        None
    }

    /// Returns the separator between batched statements.
    fn statement_separator(&self) -> &'static str {
        ";"
    }

    /// Returns the default SELECT template.
    fn select_template(&self) -> &'static str {
        SELECT_TEMPLATE
    }

    /// Returns the default INSERT template.
    fn insert_template(&self) -> &'static str {
        INSERT_TEMPLATE
    }

    /// Returns the default UPDATE template.
    fn update_template(&self) -> &'static str {
        UPDATE_TEMPLATE
    }

    /// Returns the default DELETE template.
    fn delete_template(&self) -> &'static str {
        DELETE_TEMPLATE
    }
}
