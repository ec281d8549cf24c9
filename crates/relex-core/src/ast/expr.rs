//! Condition builder helpers.
//!
//! ```rust
//! use relex_core::ast::field;
//!
//! let adults = field("age").ge(18).and(field("name").like("A%"));
//! ```

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::field::FieldRef;
use super::node::{Conditions, Node};
use super::query::Query;
use super::types::{Literal, SqlValue, ToSqlValue};
use super::value::Value;

/// Starts a condition on a field.
#[must_use]
pub fn field(name: &str) -> Operand {
    Operand(Value::field(name))
}

/// Left-hand side of a condition under construction.
#[derive(Debug, Clone)]
pub struct Operand(pub Value);

impl Operand {
    /// Starts a condition on any value.
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    fn compare(self, op: Conditions, rvalue: impl Into<Value>) -> Node {
        Node::condition(self.0, op, rvalue)
    }

    /// `=`; comparing with NULL yields an `IS NULL` test.
    #[must_use]
    pub fn eq(self, rvalue: impl Into<Value>) -> Node {
        self.compare(Conditions::EQUAL, rvalue)
    }

    /// `<>`
    #[must_use]
    pub fn ne(self, rvalue: impl Into<Value>) -> Node {
        self.compare(Conditions::EQUAL | Conditions::NOT, rvalue)
    }

    /// `<`
    #[must_use]
    pub fn lt(self, rvalue: impl Into<Value>) -> Node {
        self.compare(Conditions::LESS_THAN, rvalue)
    }

    /// `<=`
    #[must_use]
    pub fn le(self, rvalue: impl Into<Value>) -> Node {
        self.compare(Conditions::LESS_THAN | Conditions::EQUAL, rvalue)
    }

    /// `>`
    #[must_use]
    pub fn gt(self, rvalue: impl Into<Value>) -> Node {
        self.compare(Conditions::GREATER_THAN, rvalue)
    }

    /// `>=`
    #[must_use]
    pub fn ge(self, rvalue: impl Into<Value>) -> Node {
        self.compare(Conditions::GREATER_THAN | Conditions::EQUAL, rvalue)
    }

    /// `LIKE`
    #[must_use]
    pub fn like(self, pattern: impl Into<Value>) -> Node {
        self.compare(Conditions::LIKE, pattern)
    }

    /// `IN` over a list of constants.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Node {
        self.compare(Conditions::IN, Literal::new(values))
    }

    /// `IN` over a subquery.
    #[must_use]
    pub fn in_query(self, query: Query) -> Node {
        self.compare(Conditions::IN, query)
    }

    /// `IS NULL`
    #[must_use]
    pub fn is_null(self) -> Node {
        self.compare(Conditions::NULL, Value::null())
    }

    /// `IS NOT NULL`
    #[must_use]
    pub fn is_not_null(self) -> Node {
        self.compare(Conditions::NULL | Conditions::NOT, Value::null())
    }
}

macro_rules! literal_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::literal(value)
                }
            }
        )*
    };
}

literal_into_value!(
    i8,
    u8,
    i16,
    u16,
    i32,
    u32,
    i64,
    bool,
    f32,
    f64,
    char,
    Decimal,
    NaiveDateTime,
    String,
    &str,
    SqlValue,
);

impl<T: ToSqlValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Self::literal(value)
    }
}

impl From<FieldRef> for Operand {
    fn from(field: FieldRef) -> Self {
        Self(Value::Field(field))
    }
}
