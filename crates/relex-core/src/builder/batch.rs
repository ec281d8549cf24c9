//! Statement batching.

use tracing::debug;

use super::{collect_changeset, CommandBuilder, SqlCommand};
use crate::ast::{Query, TableRef, Value};
use crate::compiler::ParamCollector;
use crate::error::Result;

/// Accumulates statements into one command.
///
/// Every statement registers its parameters in the same collector, so
/// placeholder numbering continues across the whole batch.
///
/// ```rust
/// use relex_core::ast::Value;
/// use relex_core::builder::CommandBuilder;
/// use relex_core::dialect::GenericDialect;
///
/// let builder = CommandBuilder::new(GenericDialect::new());
/// let mut batch = builder.batch();
/// batch.insert("test", [("FieldA", Value::literal("A"))]).unwrap();
/// batch.insert("test", [("FieldC", Value::literal("C"))]).unwrap();
/// let command = batch.finish();
///
/// assert_eq!(
///     command.text,
///     "INSERT INTO test (FieldA) VALUES (@p0);INSERT INTO test (FieldC) VALUES (@p1)"
/// );
/// ```
pub struct CommandBatch<'a> {
    builder: &'a CommandBuilder,
    separator: String,
    statements: Vec<String>,
    params: ParamCollector,
}

impl<'a> CommandBatch<'a> {
    pub(super) fn new(builder: &'a CommandBuilder) -> Self {
        Self {
            builder,
            separator: String::from(builder.dialect.statement_separator()),
            statements: Vec::new(),
            params: builder.collector(),
        }
    }

    /// Replaces the dialect's statement separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Returns the number of statements appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if no statement was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Appends a SELECT.
    pub fn select(&mut self, query: &Query) -> Result<&mut Self> {
        self.append(|builder, params| Ok(builder.select_text(query, params)?))
    }

    /// Appends a COUNT.
    pub fn count(&mut self, query: &Query) -> Result<&mut Self> {
        self.append(|builder, params| Ok(builder.count_text(query, params)?))
    }

    /// Appends an INSERT.
    pub fn insert<T, I, K, V>(&mut self, table: T, changeset: I) -> Result<&mut Self>
    where
        T: Into<TableRef>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let table = table.into();
        let changeset = collect_changeset(changeset);
        self.append(|builder, params| builder.insert_text(&table, &changeset, params))
    }

    /// Appends an UPDATE.
    pub fn update<I, K, V>(&mut self, query: &Query, changeset: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let changeset = collect_changeset(changeset);
        self.append(|builder, params| builder.update_text(query, &changeset, params))
    }

    /// Appends a DELETE.
    pub fn delete(&mut self, query: &Query) -> Result<&mut Self> {
        self.append(|builder, params| builder.delete_text(query, params))
    }

    /// Joins the statements into one command.
    #[must_use]
    pub fn finish(self) -> SqlCommand {
        debug!(
            statements = self.statements.len(),
            parameters = self.params.len(),
            "composed batch"
        );
        SqlCommand {
            text: self.statements.join(&self.separator),
            parameters: self.params.into_parameters(),
        }
    }

    /// Runs `compose` against the shared collector. On failure the
    /// parameters it registered are dropped.
    fn append<F>(&mut self, compose: F) -> Result<&mut Self>
    where
        F: FnOnce(&CommandBuilder, &mut ParamCollector) -> Result<String>,
    {
        let mark = self.params.len();
        match compose(self.builder, &mut self.params) {
            Ok(text) => {
                self.statements.push(text);
                Ok(self)
            }
            Err(err) => {
                self.params.truncate(mark);
                Err(err)
            }
        }
    }
}
