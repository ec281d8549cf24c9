//! Parameter sinks.

use crate::ast::{Literal, SqlValue, TypeCode};

/// Receives every literal the compiler meets and returns the placeholder
/// written into the SQL text in its place.
pub trait ParameterSink {
    /// Registers a literal and returns its placeholder.
    fn add(&mut self, literal: &Literal) -> String;
}

impl<F> ParameterSink for F
where
    F: FnMut(&Literal) -> String,
{
    fn add(&mut self, literal: &Literal) -> String {
        self(literal)
    }
}

/// A registered parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Placeholder as written in the SQL text, e.g. `@p0`.
    pub placeholder: String,
    /// Bound value.
    pub value: SqlValue,
    /// Declared type.
    pub type_code: TypeCode,
}

/// Collects parameters numbered from 0 under a fixed prefix.
#[derive(Debug, Clone, Default)]
pub struct ParamCollector {
    prefix: String,
    params: Vec<Parameter>,
}

impl ParamCollector {
    /// Creates a collector producing `<prefix>0`, `<prefix>1`, ...
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            params: Vec::new(),
        }
    }

    /// Returns the number of registered parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if no parameter was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the registered parameters in placeholder order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Drops the parameters registered after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.params.truncate(len);
    }

    /// Consumes the collector, returning its parameters.
    #[must_use]
    pub fn into_parameters(self) -> Vec<Parameter> {
        self.params
    }
}

impl ParameterSink for ParamCollector {
    fn add(&mut self, literal: &Literal) -> String {
        let placeholder = format!("{}{}", self.prefix, self.params.len());
        self.params.push(Parameter {
            placeholder: placeholder.clone(),
            value: literal.value.clone(),
            type_code: literal.type_code,
        });
        placeholder
    }
}
