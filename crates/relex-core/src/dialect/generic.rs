//! Generic SQL dialect.

use super::Dialect;

/// A generic SQL dialect: bare identifiers, `@p<N>` placeholders and
/// `LIMIT`/`OFFSET` paging.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.quote_identifier("users"), "users");
        assert_eq!(dialect.parameter_prefix(), "@p");
        assert_eq!(dialect.unbounded_limit(), None);
        assert_eq!(dialect.statement_separator(), ";");
    }
}
