//! The query root aggregate.

use std::collections::BTreeMap;

use super::field::{FieldRef, SortSpec, TableRef};
use super::node::{visit_variables, Node};
use super::types::Literal;
use super::value::Value;

/// An abstract query: table, predicate, projection, ordering and paging.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The queried table.
    pub table: TableRef,
    /// Predicate.
    pub condition: Option<Node>,
    /// Projection; `None` selects every column.
    pub fields: Option<Vec<FieldRef>>,
    /// Ordering.
    pub sort: Option<Vec<SortSpec>>,
    /// Number of records to skip.
    pub record_offset: u32,
    /// Maximum number of records; `None` is unbounded.
    pub record_count: Option<u32>,
    /// Extra template placeholders, passed through to statement templates.
    pub extended_properties: BTreeMap<String, String>,
}

impl Query {
    /// Creates a query selecting every column of a table.
    #[must_use]
    pub fn new(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            condition: None,
            fields: None,
            sort: None,
            record_offset: 0,
            record_count: None,
            extended_properties: BTreeMap::new(),
        }
    }

    /// Sets the predicate.
    #[must_use]
    pub fn filter(mut self, condition: Node) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the projection.
    #[must_use]
    pub fn select<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldRef>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn order_by<I, S>(mut self, sort: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SortSpec>,
    {
        self.sort = Some(sort.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the paging window.
    #[must_use]
    pub const fn paged(mut self, offset: u32, count: Option<u32>) -> Self {
        self.record_offset = offset;
        self.record_count = count;
        self
    }

    /// Adds an extended property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extended_properties.insert(key.into(), value.into());
        self
    }

    /// Finds a labelled node in the predicate.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.condition.as_ref().and_then(|c| c.find(name))
    }

    /// Returns a copy whose projection, ordering and predicate leaves have
    /// been passed through `f`. Only field values of the projection and
    /// ordering are remapped.
    #[must_use]
    pub fn map_leaves<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        let mut remap_field = |field: &FieldRef| match f(&Value::Field(field.clone())) {
            Value::Field(mapped) => mapped,
            _ => field.clone(),
        };
        let fields = self
            .fields
            .as_ref()
            .map(|fields| fields.iter().map(&mut remap_field).collect());
        let sort = self.sort.as_ref().map(|sort| {
            sort.iter()
                .map(|s| SortSpec {
                    field: remap_field(&s.field),
                    direction: s.direction,
                })
                .collect()
        });
        let condition = self.condition.as_ref().map(|c| c.map_leaves(&mut f));
        Self {
            table: self.table.clone(),
            condition,
            fields,
            sort,
            record_offset: self.record_offset,
            record_count: self.record_count,
            extended_properties: self.extended_properties.clone(),
        }
    }

    /// Binds every variable of the predicate whose name appears in
    /// `values`. Returns the number of variables bound.
    pub fn bind_variables(&self, values: &BTreeMap<String, Literal>) -> usize {
        let mut bound = 0;
        if let Some(condition) = &self.condition {
            visit_variables(condition, &mut |var| {
                if let Some(value) = values.get(var.name()) {
                    var.bind(value.clone());
                    bound += 1;
                }
            });
        }
        bound
    }

    /// Clears every variable binding of the predicate.
    pub fn unbind_variables(&self) {
        if let Some(condition) = &self.condition {
            visit_variables(condition, &mut |var| var.unset());
        }
    }
}
