//! Values appearing on either side of a condition.

use super::field::FieldRef;
use super::query::Query;
use super::types::{Literal, ToSqlValue};
use super::variable::Variable;

/// A condition operand or changeset value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A column or computed expression.
    Field(FieldRef),
    /// A typed constant.
    Literal(Literal),
    /// A late-bound constant.
    Variable(Variable),
    /// A nested query.
    Query(Box<Query>),
    /// Verbatim SQL.
    RawSql(String),
}

impl Value {
    /// Creates a field value from a field string.
    #[must_use]
    pub fn field(text: &str) -> Self {
        Self::Field(FieldRef::parse(text))
    }

    /// Creates a literal value.
    #[must_use]
    pub fn literal<T: ToSqlValue>(value: T) -> Self {
        Self::Literal(Literal::new(value))
    }

    /// The NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::null())
    }

    /// Creates an unbound variable value.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(Variable::new(name))
    }

    /// Creates a raw SQL value.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::RawSql(sql.into())
    }

    /// Returns true if the value is the NULL literal.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Literal(lit) if lit.is_null())
    }

    /// Returns the nested query, if any.
    #[must_use]
    pub fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(query) => Some(query),
            _ => None,
        }
    }
}

impl From<FieldRef> for Value {
    fn from(field: FieldRef) -> Self {
        Self::Field(field)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Variable> for Value {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<Query> for Value {
    fn from(query: Query) -> Self {
        Self::Query(Box::new(query))
    }
}
