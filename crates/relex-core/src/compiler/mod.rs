//! SQL expression compiler.
//!
//! Turns condition trees, fields and sort lists into dialect-specific SQL
//! fragments. Identifier quoting comes from the [`Dialect`](crate::dialect::Dialect),
//! nested queries from a [`SubqueryResolver`] and placeholders from a
//! [`ParameterSink`].

mod params;
mod sql;

pub use params::{ParamCollector, Parameter, ParameterSink};
pub use sql::{SqlCompiler, SubqueryResolver};
