//! INSERT composition.

use tracing::debug;

use super::{Changeset, CommandBuilder};
use crate::ast::TableRef;
use crate::compiler::ParameterSink;
use crate::error::{CompileError, Result};
use crate::template::{Resolved, StringTemplate};

impl CommandBuilder {
    pub(super) fn insert_text(
        &self,
        table: &TableRef,
        changeset: &Changeset,
        sink: &mut dyn ParameterSink,
    ) -> Result<String> {
        if changeset.is_empty() {
            return Err(CompileError::EmptyChangeset(table.name.clone()).into());
        }
        let compiler = self.compiler();

        let mut columns = Vec::with_capacity(changeset.len());
        let mut values = Vec::with_capacity(changeset.len());
        for (name, value) in changeset {
            columns.push(self.dialect.quote_identifier(name));
            values.push(compiler.compile_value(value, sink)?);
        }
        let table_sql = self.table_sql(table);
        let columns = columns.join(",");
        let values = values.join(",");

        let text = StringTemplate::new().format(self.dialect.insert_template(), |name| match name {
            "table" => Resolved::from(table_sql.as_str()),
            "columns" => Resolved::from(columns.as_str()),
            "values" => Resolved::from(values.as_str()),
            _ => Resolved::Undefined,
        })?;

        debug!(
            operation = "insert",
            table = %table.name,
            columns = changeset.len(),
            "composed statement"
        );
        Ok(text)
    }
}
