//! Query expression model: tables, condition trees, fields, sorting and
//! paging.

mod expr;
mod field;
mod node;
mod query;
mod types;
mod value;
mod variable;

pub use expr::{field, Operand};
pub use field::{FieldRef, SortDirection, SortSpec, TableRef};
pub use node::{
    visit_variables, ConditionNode, Conditions, Connective, GroupNode, NegationNode, Node,
    RawSqlNode, TreeItem,
};
pub use query::Query;
pub use types::{Literal, SqlValue, ToSqlValue, TypeCode};
pub use value::Value;
pub use variable::Variable;
