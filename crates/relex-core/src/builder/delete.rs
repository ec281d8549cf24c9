//! DELETE composition.

use tracing::debug;

use super::CommandBuilder;
use crate::ast::Query;
use crate::compiler::ParameterSink;
use crate::error::Result;
use crate::template::{Resolved, StringTemplate};

impl CommandBuilder {
    pub(super) fn delete_text(&self, query: &Query, sink: &mut dyn ParameterSink) -> Result<String> {
        let condition = match &query.condition {
            Some(node) => self.compiler().compile_condition(node, sink)?,
            None => None,
        };
        let table_sql = self.table_sql(&query.table);

        let text = StringTemplate::new().format(self.dialect.delete_template(), |name| match name {
            "table" => Resolved::from(table_sql.as_str()),
            "where" => condition
                .as_deref()
                .map_or(Resolved::NotApplicable, Resolved::from),
            _ => Resolved::Undefined,
        })?;

        debug!(operation = "delete", table = %query.table.name, "composed statement");
        Ok(text)
    }
}
