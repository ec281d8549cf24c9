//! Command Builder
//!
//! Turns queries and changesets into complete, parameterized SQL statements.
//! Fragments (`@where`, `@columns`, `@set`, ...) are produced by the
//! [`SqlCompiler`] and merged into per-operation templates by the
//! [`StringTemplate`](crate::template::StringTemplate) engine.
//!
//! # Example
//!
//! ```rust
//! use relex_core::ast::{field, Query};
//! use relex_core::builder::CommandBuilder;
//! use relex_core::dialect::GenericDialect;
//!
//! let builder = CommandBuilder::new(GenericDialect::new());
//! let query = Query::new("users")
//!     .filter(field("active").eq(true))
//!     .select(["id", "name"]);
//! let command = builder.build_select(&query).unwrap();
//!
//! assert_eq!(command.text, "SELECT id,name FROM users WHERE active=@p0");
//! assert_eq!(command.parameters.len(), 1);
//! ```

mod batch;
mod delete;
mod insert;
mod select;
mod update;
mod view;

use std::collections::BTreeMap;

pub use batch::CommandBatch;
pub use view::View;

use crate::ast::{Query, TableRef, Value};
use crate::compiler::{ParamCollector, Parameter, ParameterSink, SqlCompiler, SubqueryResolver};
use crate::dialect::Dialect;
use crate::error::{CompileError, Result};

/// A compiled statement and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlCommand {
    /// SQL text with `@p<N>` placeholders.
    pub text: String,
    /// Parameters in placeholder order.
    pub parameters: Vec<Parameter>,
}

/// Builds SELECT/INSERT/UPDATE/DELETE commands for one dialect.
pub struct CommandBuilder {
    dialect: Box<dyn Dialect>,
    views: BTreeMap<String, View>,
}

impl CommandBuilder {
    /// Creates a builder for `dialect` with no views.
    #[must_use]
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self {
            dialect: Box::new(dialect),
            views: BTreeMap::new(),
        }
    }

    /// Registers a view. SELECTs on a table named like the view use its
    /// template and field mapping.
    #[must_use]
    pub fn with_view(mut self, view: View) -> Self {
        self.views.insert(view.name.clone(), view);
        self
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the view registered for `table`, if any.
    #[must_use]
    pub fn view(&self, table: &str) -> Option<&View> {
        self.views.get(table)
    }

    /// Builds a SELECT for `query`.
    pub fn build_select(&self, query: &Query) -> Result<SqlCommand> {
        self.single(|builder, sink| Ok(builder.select_text(query, sink)?))
    }

    /// Builds a `count(*)` SELECT for `query`, ignoring its projection and
    /// paging.
    pub fn build_count(&self, query: &Query) -> Result<SqlCommand> {
        self.single(|builder, sink| Ok(builder.count_text(query, sink)?))
    }

    /// Builds an INSERT of `changeset` into `table`.
    pub fn build_insert<T, I, K, V>(&self, table: T, changeset: I) -> Result<SqlCommand>
    where
        T: Into<TableRef>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let table = table.into();
        let changeset = collect_changeset(changeset);
        self.single(|builder, sink| builder.insert_text(&table, &changeset, sink))
    }

    /// Builds an UPDATE of the rows matched by `query`.
    pub fn build_update<I, K, V>(&self, query: &Query, changeset: I) -> Result<SqlCommand>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let changeset = collect_changeset(changeset);
        self.single(|builder, sink| builder.update_text(query, &changeset, sink))
    }

    /// Builds a DELETE of the rows matched by `query`.
    pub fn build_delete(&self, query: &Query) -> Result<SqlCommand> {
        self.single(|builder, sink| builder.delete_text(query, sink))
    }

    /// Starts a batch: statements appended to it share one parameter list.
    #[must_use]
    pub fn batch(&self) -> CommandBatch<'_> {
        CommandBatch::new(self)
    }

    fn single<F>(&self, compose: F) -> Result<SqlCommand>
    where
        F: FnOnce(&Self, &mut ParamCollector) -> Result<String>,
    {
        let mut params = self.collector();
        let text = compose(self, &mut params)?;
        Ok(SqlCommand {
            text,
            parameters: params.into_parameters(),
        })
    }

    fn collector(&self) -> ParamCollector {
        ParamCollector::new(self.dialect.parameter_prefix())
    }

    fn compiler(&self) -> SqlCompiler<'_> {
        SqlCompiler::new(self.dialect.as_ref()).with_resolver(self)
    }

    /// Renders a table reference: quoted name, then quoted alias.
    fn table_sql(&self, table: &TableRef) -> String {
        let name = self.dialect.quote_identifier(&table.name);
        match &table.alias {
            Some(alias) => format!("{name} {}", self.dialect.quote_identifier(alias)),
            None => name,
        }
    }
}

impl SubqueryResolver for CommandBuilder {
    /// Renders a subquery as a full SELECT, through its view when one is
    /// registered for its table.
    fn resolve(
        &self,
        query: &Query,
        sink: &mut dyn ParameterSink,
    ) -> core::result::Result<String, CompileError> {
        self.select_text(query, sink)
    }
}

/// An ordered name → value mapping written by INSERT and UPDATE.
type Changeset = Vec<(String, Value)>;

fn collect_changeset<I, K, V>(changeset: I) -> Changeset
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    changeset
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}
