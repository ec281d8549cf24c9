//! Named SELECT overrides.

use std::collections::BTreeMap;

use crate::ast::{FieldRef, Value};

/// A named override of the SELECT template and column mapping for a table.
///
/// Queries whose table name equals the view name are built with the view's
/// template (when set), and every plain field named in the mapping is
/// replaced by its column expression, in the projection, the predicate and
/// the ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    /// View name, matched against the query table name.
    pub name: String,
    /// SELECT template replacing the dialect default.
    pub template: Option<String>,
    /// Field name → SQL column expression.
    pub field_mapping: BTreeMap<String, String>,
}

impl View {
    /// Creates a view with no template and no mapping.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the SELECT template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Maps `field` to the SQL expression `column`.
    #[must_use]
    pub fn map_field(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.field_mapping.insert(field.into(), column.into());
        self
    }

    /// Remaps one leaf value. Only plain, mapped fields change.
    pub(crate) fn map_value(&self, value: &Value) -> Value {
        match value {
            Value::Field(field) if field.expression.is_none() => self
                .field_mapping
                .get(&field.name)
                .map_or_else(|| value.clone(), |column| {
                    Value::Field(FieldRef::computed(column.as_str(), field.name.as_str()))
                }),
            _ => value.clone(),
        }
    }
}
