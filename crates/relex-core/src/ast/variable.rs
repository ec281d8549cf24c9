//! Late-bound query variables.

use std::sync::Arc;

use parking_lot::RwLock;

use super::types::{Literal, SqlValue, ToSqlValue};
use crate::error::VariableError;

/// A named, lazily-bound literal.
///
/// Cloning a `Variable` shares its binding cell: binding one clone binds
/// every tree holding it. Use [`Variable::detached`] to get an independent
/// cell.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    format: Option<String>,
    binding: Arc<RwLock<Option<Literal>>>,
}

impl Variable {
    /// Creates an unbound variable.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: None,
            binding: Arc::new(RwLock::new(None)),
        }
    }

    /// Sets a `{0}` format applied to the bound value when it is read,
    /// e.g. `%{0}%` for LIKE patterns.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Returns the variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the read format, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Binds a value.
    pub fn set<T: ToSqlValue>(&self, value: T) {
        self.bind(Literal::new(value));
    }

    /// Binds a literal.
    pub fn bind(&self, literal: Literal) {
        *self.binding.write() = Some(literal);
    }

    /// Clears the binding.
    pub fn unset(&self) {
        *self.binding.write() = None;
    }

    /// Returns true if a value is bound.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.binding.read().is_some()
    }

    /// Reads the bound value, applying the format if one is set.
    pub fn value(&self) -> Result<Literal, VariableError> {
        let bound = self
            .binding
            .read()
            .clone()
            .ok_or_else(|| VariableError::Unbound {
                name: self.name.clone(),
            })?;
        Ok(match &self.format {
            Some(format) if !bound.is_null() => Literal::new(SqlValue::Text(
                format.replace("{0}", &bound.value.to_text()),
            )),
            _ => bound,
        })
    }

    /// Returns a copy with its own binding cell, initialised with the
    /// current binding.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            name: self.name.clone(),
            format: self.format.clone(),
            binding: Arc::new(RwLock::new(self.binding.read().clone())),
        }
    }

    /// Returns true if both variables share one binding cell.
    #[must_use]
    pub fn shares_binding(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.binding, &other.binding)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.format == other.format
            && (self.shares_binding(other) || *self.binding.read() == *other.binding.read())
    }
}
