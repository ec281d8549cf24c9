//! Microsoft SQL Server dialect.

use super::Dialect;

/// SELECT template paging with `TOP`. `@recordtop` is offset plus count, so
/// the reader skips the first `offset` rows itself.
const SELECT_TEMPLATE: &str = "SELECT @recordtop[TOP {0} ]@columns FROM @table@where[ WHERE {0}]@groupby[ GROUP BY {0}]@orderby[ ORDER BY {0}]";

/// SQL Server dialect: `[bracket]` quoting and `TOP` paging.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsSqlDialect;

impl MsSqlDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MsSqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn identifier_quotes(&self) -> Option<(char, char)> {
        Some(('[', ']'))
    }

    fn select_template(&self) -> &'static str {
        SELECT_TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mssql_quoting() {
        let dialect = MsSqlDialect::new();
        assert_eq!(dialect.quote_identifier("users"), "[users]");
        assert_eq!(dialect.quote_identifier("odd]name"), "[odd]]name]");
        assert_eq!(dialect.quote_identifier("*"), "*");
    }

    #[test]
    fn test_mssql_select_template_uses_top() {
        assert!(MsSqlDialect::new().select_template().contains("@recordtop[TOP {0} ]"));
    }
}
