//! SQL expression compiler.

use super::params::ParameterSink;
use crate::ast::{ConditionNode, Conditions, FieldRef, Literal, Node, Query, SortSpec, Value};
use crate::dialect::Dialect;
use crate::error::CompileError;

/// Compiles nested queries to SQL text.
pub trait SubqueryResolver {
    /// Compiles `query`, registering its literals in `sink`.
    fn resolve(&self, query: &Query, sink: &mut dyn ParameterSink)
        -> Result<String, CompileError>;
}

impl<F> SubqueryResolver for F
where
    F: Fn(&Query, &mut dyn ParameterSink) -> Result<String, CompileError>,
{
    fn resolve(
        &self,
        query: &Query,
        sink: &mut dyn ParameterSink,
    ) -> Result<String, CompileError> {
        self(query, sink)
    }
}

/// Renders condition trees, fields and sort lists as SQL fragments.
///
/// Literals never appear in the output: each one is registered in the
/// parameter sink and its placeholder is written instead.
///
/// ```rust
/// use relex_core::ast::field;
/// use relex_core::compiler::{ParamCollector, SqlCompiler};
/// use relex_core::dialect::GenericDialect;
///
/// let dialect = GenericDialect::new();
/// let mut params = ParamCollector::new("@p");
/// let sql = SqlCompiler::new(&dialect)
///     .compile_condition(&field("age").ge(18), &mut params)
///     .unwrap();
/// assert_eq!(sql.as_deref(), Some("age>=@p0"));
/// ```
#[derive(Clone, Copy)]
pub struct SqlCompiler<'a> {
    dialect: &'a dyn Dialect,
    resolver: Option<&'a dyn SubqueryResolver>,
}

impl<'a> SqlCompiler<'a> {
    /// Creates a compiler without subquery support.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            resolver: None,
        }
    }

    /// Sets the subquery resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn SubqueryResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Compiles a condition tree. Returns `None` when the tree renders to
    /// nothing (for example an empty group).
    pub fn compile_condition(
        &self,
        node: &Node,
        sink: &mut dyn ParameterSink,
    ) -> Result<Option<String>, CompileError> {
        match node {
            Node::Group(group) => {
                let mut parts = Vec::with_capacity(group.children.len());
                for child in &group.children {
                    if let Some(sql) = self.compile_condition(child, sink)? {
                        parts.push(sql);
                    }
                }
                Ok(match parts.len() {
                    0 => None,
                    1 => parts.pop(),
                    _ => Some(
                        parts
                            .iter()
                            .map(|part| format!("({part})"))
                            .collect::<Vec<_>>()
                            .join(&format!(" {} ", group.connective.as_sql())),
                    ),
                })
            }
            Node::Condition(condition) => self.condition(condition, sink).map(Some),
            Node::Negation(negation) => Ok(self
                .compile_condition(&negation.child, sink)?
                .map(|sql| format!("NOT({sql})"))),
            Node::RawSql(raw) => Ok(Some(raw.text.clone())),
        }
    }

    fn condition(
        &self,
        condition: &ConditionNode,
        sink: &mut dyn ParameterSink,
    ) -> Result<String, CompileError> {
        let negated = condition.op.is_negated();
        let base = condition.op.base();

        if base == Conditions::IN && is_empty_list(&condition.rvalue)? {
            return Ok(if negated {
                String::from("NOT (0=1)")
            } else {
                String::from("0=1")
            });
        }

        let lvalue = self.compile_value(&condition.lvalue, sink)?;

        if base == Conditions::NULL {
            return Ok(if negated {
                format!("{lvalue} IS NOT NULL")
            } else {
                format!("{lvalue} IS NULL")
            });
        }
        if base == Conditions::EQUAL {
            let rvalue = self.compile_value(&condition.rvalue, sink)?;
            return Ok(if negated {
                format!("{lvalue}<>{rvalue}")
            } else {
                format!("{lvalue}={rvalue}")
            });
        }

        let sql = if base == Conditions::IN {
            let list = self.value(&condition.rvalue, true, sink)?;
            format!("{lvalue} IN ({list})")
        } else {
            let op = if base == Conditions::LIKE {
                " LIKE "
            } else if base == Conditions::GREATER_THAN {
                ">"
            } else if base == Conditions::GREATER_THAN | Conditions::EQUAL {
                ">="
            } else if base == Conditions::LESS_THAN {
                "<"
            } else if base == Conditions::LESS_THAN | Conditions::EQUAL {
                "<="
            } else {
                return Err(CompileError::InvalidCondition {
                    lvalue,
                    op: format!("{:?}", condition.op),
                });
            };
            let rvalue = self.compile_value(&condition.rvalue, sink)?;
            format!("{lvalue}{op}{rvalue}")
        };

        Ok(if negated { format!("NOT ({sql})") } else { sql })
    }

    /// Compiles a value. Subqueries are parenthesized.
    pub fn compile_value(
        &self,
        value: &Value,
        sink: &mut dyn ParameterSink,
    ) -> Result<String, CompileError> {
        self.value(value, false, sink)
    }

    fn value(
        &self,
        value: &Value,
        in_list: bool,
        sink: &mut dyn ParameterSink,
    ) -> Result<String, CompileError> {
        match value {
            Value::Field(field) => Ok(self.compile_field(field)),
            Value::Literal(literal) => Ok(literal_placeholders(literal, sink)),
            Value::Variable(variable) => Ok(literal_placeholders(&variable.value()?, sink)),
            Value::Query(query) => {
                let resolver =
                    self.resolver
                        .ok_or_else(|| CompileError::MissingSubqueryResolver {
                            table: query.table.name.clone(),
                        })?;
                let sql = resolver.resolve(query, sink)?;
                Ok(if in_list { sql } else { format!("({sql})") })
            }
            Value::RawSql(sql) => Ok(sql.clone()),
        }
    }

    /// Renders a field: its expression verbatim, or its quoted
    /// `prefix.name`.
    #[must_use]
    pub fn compile_field(&self, field: &FieldRef) -> String {
        if let Some(expression) = &field.expression {
            return expression.clone();
        }
        let name = self.dialect.quote_identifier(&field.name);
        match &field.prefix {
            Some(prefix) => format!("{}.{name}", self.dialect.quote_identifier(prefix)),
            None => name,
        }
    }

    /// Renders a sort list as `field ASC|DESC` items joined by commas.
    #[must_use]
    pub fn compile_sort(&self, sort: &[SortSpec]) -> String {
        sort.iter()
            .map(|spec| {
                format!(
                    "{} {}",
                    self.compile_field(&spec.field),
                    spec.direction.as_sql()
                )
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Registers a literal; arrays register one parameter per element.
fn literal_placeholders(literal: &Literal, sink: &mut dyn ParameterSink) -> String {
    if literal.is_array() {
        literal
            .elements()
            .iter()
            .map(|element| sink.add(element))
            .collect::<Vec<_>>()
            .join(",")
    } else {
        sink.add(literal)
    }
}

fn is_empty_list(value: &Value) -> Result<bool, CompileError> {
    Ok(match value {
        Value::Literal(literal) => literal.is_array() && literal.elements().is_empty(),
        Value::Variable(variable) => {
            let literal = variable.value()?;
            literal.is_array() && literal.elements().is_empty()
        }
        _ => false,
    })
}
