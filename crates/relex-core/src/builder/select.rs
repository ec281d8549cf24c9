//! SELECT and COUNT composition.

use tracing::debug;

use super::CommandBuilder;
use crate::ast::{FieldRef, Query};
use crate::compiler::{ParameterSink, SqlCompiler};
use crate::error::CompileError;
use crate::template::{Resolved, StringTemplate};

/// Projection used by COUNT commands.
const COUNT_EXPRESSION: &str = "count(*)";

/// Compiled SELECT fragments.
struct SelectParts {
    table: String,
    columns: String,
    condition: Option<String>,
    group_by: Option<String>,
    order_by: Option<String>,
}

impl CommandBuilder {
    pub(super) fn select_text(
        &self,
        query: &Query,
        sink: &mut dyn ParameterSink,
    ) -> Result<String, CompileError> {
        let query = self.apply_view(query);
        let compiler = self.compiler();

        let condition = match &query.condition {
            Some(node) => compiler.compile_condition(node, sink)?,
            None => None,
        };
        let parts = SelectParts {
            table: self.table_sql(&query.table),
            columns: self.columns_sql(&query, &compiler),
            condition,
            group_by: group_by_sql(&query, &compiler),
            order_by: query
                .sort
                .as_deref()
                .filter(|sort| !sort.is_empty())
                .map(|sort| compiler.compile_sort(sort)),
        };

        let template = self
            .view(&query.table.name)
            .and_then(|view| view.template.as_deref())
            .unwrap_or_else(|| self.dialect.select_template());
        let count_only = is_count_only(&query);
        let offset = query.record_offset;
        let unbounded = self.dialect.unbounded_limit();

        let text = StringTemplate::new().format(template, |name| match name {
            "table" => Resolved::from(parts.table.as_str()),
            "columns" => Resolved::from(parts.columns.as_str()),
            "where" => applicable(parts.condition.as_deref()),
            "groupby" => applicable(parts.group_by.as_deref()),
            "orderby" if count_only => Resolved::NotApplicable,
            "orderby" => applicable(parts.order_by.as_deref()),
            "recordoffset" if offset == 0 => Resolved::Value(None),
            "recordoffset" => Resolved::from(offset.to_string()),
            "recordcount" => match (query.record_count, unbounded) {
                (Some(count), _) => Resolved::from(count.to_string()),
                (None, Some(limit)) if offset > 0 => Resolved::from(limit),
                (None, _) => Resolved::Value(None),
            },
            "recordtop" => query.record_count.map_or(Resolved::Value(None), |count| {
                Resolved::from((u64::from(offset) + u64::from(count)).to_string())
            }),
            key => query
                .extended_properties
                .get(key)
                .map_or(Resolved::Undefined, |value| Resolved::from(value.as_str())),
        })?;

        debug!(
            operation = "select",
            table = %query.table.name,
            count_only,
            "composed statement"
        );
        Ok(text)
    }

    pub(super) fn count_text(
        &self,
        query: &Query,
        sink: &mut dyn ParameterSink,
    ) -> Result<String, CompileError> {
        let mut count = query.clone();
        count.fields = Some(vec![FieldRef::computed(COUNT_EXPRESSION, COUNT_EXPRESSION)]);
        count.record_offset = 0;
        count.record_count = None;
        self.select_text(&count, sink)
    }

    /// Applies the field mapping of the query table's view, if any.
    fn apply_view(&self, query: &Query) -> Query {
        match self.view(&query.table.name) {
            Some(view) if !view.field_mapping.is_empty() => {
                query.map_leaves(|value| view.map_value(value))
            }
            _ => query.clone(),
        }
    }

    /// Renders the projection: `*`, or a comma list where aliased
    /// expressions become `(<expr>) as <name>`.
    fn columns_sql(&self, query: &Query, compiler: &SqlCompiler<'_>) -> String {
        match query.fields.as_deref() {
            None | Some([]) => String::from("*"),
            Some(fields) => fields
                .iter()
                .map(|field| match &field.expression {
                    Some(expression) if field.is_aliased() => format!(
                        "({expression}) as {}",
                        self.dialect.quote_identifier(&field.name)
                    ),
                    _ => compiler.compile_field(field),
                })
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

fn applicable(fragment: Option<&str>) -> Resolved {
    fragment.map_or(Resolved::NotApplicable, Resolved::from)
}

/// Lists the plain fields of a projection that mixes them with aggregates.
fn group_by_sql(query: &Query, compiler: &SqlCompiler<'_>) -> Option<String> {
    let fields = query.fields.as_deref()?;
    if !fields.iter().any(FieldRef::is_aggregate) {
        return None;
    }
    let plain = fields
        .iter()
        .filter(|field| !field.is_aggregate())
        .map(|field| compiler.compile_field(field))
        .collect::<Vec<_>>();
    (!plain.is_empty()).then(|| plain.join(","))
}

/// Returns true if the projection is a single `count(...)` expression.
fn is_count_only(query: &Query) -> bool {
    match query.fields.as_deref() {
        Some([field]) => field
            .expression
            .as_deref()
            .is_some_and(|expression| expression.trim().to_ascii_lowercase().starts_with("count(")),
        _ => false,
    }
}
