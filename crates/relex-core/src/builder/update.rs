//! UPDATE composition.

use tracing::debug;

use super::{Changeset, CommandBuilder};
use crate::ast::Query;
use crate::compiler::ParameterSink;
use crate::error::{CompileError, Result};
use crate::template::{Resolved, StringTemplate};

impl CommandBuilder {
    pub(super) fn update_text(
        &self,
        query: &Query,
        changeset: &Changeset,
        sink: &mut dyn ParameterSink,
    ) -> Result<String> {
        if changeset.is_empty() {
            return Err(CompileError::EmptyChangeset(query.table.name.clone()).into());
        }
        let compiler = self.compiler();

        let mut assignments = Vec::with_capacity(changeset.len());
        for (name, value) in changeset {
            let value = compiler.compile_value(value, sink)?;
            assignments.push(format!("{}={value}", self.dialect.quote_identifier(name)));
        }
        let condition = match &query.condition {
            Some(node) => compiler.compile_condition(node, sink)?,
            None => None,
        };
        let table_sql = self.table_sql(&query.table);
        let set = assignments.join(",");

        let text = StringTemplate::new().format(self.dialect.update_template(), |name| match name {
            "table" => Resolved::from(table_sql.as_str()),
            "set" => Resolved::from(set.as_str()),
            "where" => condition
                .as_deref()
                .map_or(Resolved::NotApplicable, Resolved::from),
            _ => Resolved::Undefined,
        })?;

        debug!(
            operation = "update",
            table = %query.table.name,
            columns = changeset.len(),
            "composed statement"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{field, Query, SqlValue, Value};
    use crate::builder::CommandBuilder;
    use crate::dialect::GenericDialect;

    #[test]
    fn test_update_with_where() {
        let builder = CommandBuilder::new(GenericDialect::new());
        let query = Query::new("users").filter(field("id").eq(7));
        let command = builder
            .build_update(&query, [("name", Value::literal("Bob")), ("active", Value::literal(false))])
            .unwrap();
        assert_eq!(command.text, "UPDATE users SET name=@p0,active=@p1 WHERE id=@p2");
        assert_eq!(command.parameters[2].value, SqlValue::Int(7));
    }

    #[test]
    fn test_update_without_where() {
        let builder = CommandBuilder::new(GenericDialect::new());
        let command = builder
            .build_update(&Query::new("users"), [("active", Value::literal(true))])
            .unwrap();
        assert_eq!(command.text, "UPDATE users SET active=@p0");
    }

    #[test]
    fn test_update_with_field_value() {
        let builder = CommandBuilder::new(GenericDialect::new());
        let command = builder
            .build_update(&Query::new("stock"), [("previous", Value::field("current"))])
            .unwrap();
        assert_eq!(command.text, "UPDATE stock SET previous=current");
        assert!(command.parameters.is_empty());
    }
}
