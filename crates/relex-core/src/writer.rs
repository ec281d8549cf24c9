//! Relex builder: serializes a query tree back to Relex text.
//!
//! The output parses back to a tree that compiles to the same SQL. It is not
//! byte-identical to any original input: operators take their canonical
//! spelling and whitespace is normalized.

use crate::ast::{
    ConditionNode, Conditions, Connective, FieldRef, Literal, Node, Query, SortDirection, SqlValue,
    TableRef, TypeCode, Value,
};
use crate::error::WriteError;
use crate::parser::ARRAY_SEPARATORS;

/// Operator spellings, in lookup order. The first entry whose flags match
/// is written.
const OPERATORS: &[(&str, Conditions)] = &[
    ("=", Conditions::EQUAL),
    ("==", Conditions::EQUAL),
    ("<>", Conditions::EQUAL.union(Conditions::NOT)),
    ("!=", Conditions::EQUAL.union(Conditions::NOT)),
    (">", Conditions::GREATER_THAN),
    (">=", Conditions::GREATER_THAN.union(Conditions::EQUAL)),
    ("<", Conditions::LESS_THAN),
    ("<=", Conditions::LESS_THAN.union(Conditions::EQUAL)),
    ("like", Conditions::LIKE),
    ("in", Conditions::IN),
];

/// Words that must not be written as bare names.
const RESERVED: &[&str] = &["and", "or", "in", "like", "null"];

/// Writes a query as Relex text.
///
/// ```rust
/// use relex_core::ast::{field, Query};
///
/// let query = Query::new("users").filter(field("age").ge(18)).select(["id"]);
/// assert_eq!(relex_core::write_query(&query).unwrap(), "users(age>=18)[id]");
/// ```
pub fn write_query(query: &Query) -> Result<String, WriteError> {
    let mut writer = RelexWriter::default();
    writer.query(query)?;
    Ok(writer.out)
}

/// Writes a condition tree as Relex text.
pub fn write_condition(node: &Node) -> Result<String, WriteError> {
    let mut writer = RelexWriter::default();
    writer.top_node(node)?;
    Ok(writer.out)
}

#[derive(Default)]
struct RelexWriter {
    out: String,
}

impl RelexWriter {
    fn query(&mut self, query: &Query) -> Result<(), WriteError> {
        self.table(&query.table);

        if let Some(condition) = &query.condition {
            self.out.push('(');
            self.top_node(condition)?;
            self.out.push(')');
        }

        self.out.push('[');
        match &query.fields {
            Some(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.field(field);
                }
            }
            None => self.out.push('*'),
        }
        if let Some(sort) = &query.sort {
            self.out.push_str("; ");
            for (i, spec) in sort.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.field(&spec.field);
                if spec.direction == SortDirection::Desc {
                    self.out.push_str(" desc");
                }
            }
        }
        self.out.push(']');

        if query.record_offset != 0 || query.record_count.is_some() {
            self.out.push('{');
            self.out.push_str(&query.record_offset.to_string());
            self.out.push(',');
            if let Some(count) = query.record_count {
                self.out.push_str(&count.to_string());
            }
            self.out.push('}');
        }
        Ok(())
    }

    fn table(&mut self, table: &TableRef) {
        let text = table.to_string();
        if is_simple_name(&text) {
            self.out.push_str(&text);
        } else {
            self.quoted(&text);
            self.out.push_str(":table");
        }
    }

    fn field(&mut self, field: &FieldRef) {
        let text = match &field.expression {
            Some(expr) if field.is_aliased() => format!("{expr} as {}", field.name),
            _ => field.to_string(),
        };
        if field.is_expression() || !is_simple_name(&text) {
            self.quoted(&text);
        } else {
            self.out.push_str(&text);
        }
    }

    /// Writes a node that is already enclosed in parentheses: an unnamed
    /// group needs none of its own.
    fn top_node(&mut self, node: &Node) -> Result<(), WriteError> {
        match node {
            Node::Group(group) if group.name.is_none() => {
                self.children(group.connective, &group.children)
            }
            node => self.node(node),
        }
    }

    fn node(&mut self, node: &Node) -> Result<(), WriteError> {
        match node {
            Node::Negation(negation) => {
                self.out.push_str("!(");
                if let Some(name) = &negation.name {
                    self.label(name);
                }
                self.top_node(&negation.child)?;
                self.out.push(')');
                Ok(())
            }
            node => match node.name() {
                Some(name) => {
                    self.out.push('(');
                    self.label(name);
                    self.unlabelled(node)?;
                    self.out.push(')');
                    Ok(())
                }
                None => self.unlabelled(node),
            },
        }
    }

    fn label(&mut self, name: &str) {
        self.out.push('<');
        if is_simple_name(name) {
            self.out.push_str(name);
        } else {
            self.quoted(name);
        }
        self.out.push('>');
        self.out.push(' ');
    }

    /// Writes a node ignoring its label.
    fn unlabelled(&mut self, node: &Node) -> Result<(), WriteError> {
        match node {
            Node::Group(group) => {
                if group.name.is_some() {
                    self.children(group.connective, &group.children)
                } else {
                    self.out.push('(');
                    self.children(group.connective, &group.children)?;
                    self.out.push(')');
                    Ok(())
                }
            }
            Node::Condition(condition) => self.condition(condition),
            Node::RawSql(raw) => {
                self.quoted(&raw.text);
                self.out.push_str(":sql");
                Ok(())
            }
            Node::Negation(_) => self.node(node),
        }
    }

    fn children(&mut self, connective: Connective, children: &[Node]) -> Result<(), WriteError> {
        let separator = match connective {
            Connective::And => " and ",
            Connective::Or => " or ",
        };
        if self.out.ends_with(' ') && children.is_empty() {
            self.out.pop();
        }
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.node(child)?;
        }
        Ok(())
    }

    fn condition(&mut self, condition: &ConditionNode) -> Result<(), WriteError> {
        self.value(&condition.lvalue)?;

        if condition.op.base() == Conditions::NULL {
            self.out.push_str(if condition.op.is_negated() {
                " != null"
            } else {
                " = null"
            });
            return Ok(());
        }

        let spelling = OPERATORS
            .iter()
            .find(|(_, flags)| *flags == condition.op)
            .map(|(text, _)| (*text).to_owned())
            .or_else(|| {
                OPERATORS
                    .iter()
                    .find(|(_, flags)| *flags == condition.op.base())
                    .map(|(text, _)| format!("!{text}"))
            })
            .ok_or_else(|| WriteError::Unrepresentable(format!("operator {:?}", condition.op)))?;

        if spelling.chars().all(|c| c.is_ascii_alphabetic() || c == '!') {
            self.out.push(' ');
            self.out.push_str(&spelling);
            self.out.push(' ');
        } else {
            self.out.push_str(&spelling);
        }
        self.value(&condition.rvalue)
    }

    fn value(&mut self, value: &Value) -> Result<(), WriteError> {
        match value {
            Value::Field(field) => {
                let text = field.to_string();
                if field.is_expression() || !is_simple_name(&text) {
                    self.quoted(&text);
                    self.out.push_str(":sql");
                } else {
                    self.out.push_str(&text);
                }
            }
            Value::Literal(literal) => self.literal(literal)?,
            Value::Variable(variable) => {
                self.quoted(variable.name());
                self.out.push_str(":var");
            }
            Value::Query(query) => self.query(query)?,
            Value::RawSql(sql) => {
                self.quoted(sql);
                self.out.push_str(":sql");
            }
        }
        Ok(())
    }

    fn literal(&mut self, literal: &Literal) -> Result<(), WriteError> {
        match &literal.value {
            SqlValue::Null => {
                self.quoted("");
                self.out.push(':');
                self.out.push_str(TypeCode::DbNull.as_str());
            }
            SqlValue::List(items) => {
                let texts = items
                    .iter()
                    .map(scalar_text)
                    .collect::<Result<Vec<_>, _>>()?;
                let separator = array_separator(&texts)?;
                self.quoted(&texts.join(&separator.to_string()));
                self.out.push(':');
                self.out.push_str(literal.type_code.as_str());
                self.out.push_str("[]");
            }
            SqlValue::Text(text) if literal.type_code == TypeCode::String => self.quoted(text),
            value => {
                let text = scalar_text(value)?;
                let (inferred_code, inferred) = TypeCode::infer(&text);
                if inferred_code == literal.type_code && inferred == *value {
                    self.out.push_str(&text);
                } else {
                    self.quoted(&text);
                    self.out.push(':');
                    self.out.push_str(literal.type_code.as_str());
                }
            }
        }
        Ok(())
    }

    fn quoted(&mut self, text: &str) {
        self.out.push('"');
        self.out.push_str(&text.replace('"', "\"\""));
        self.out.push('"');
    }
}

fn scalar_text(value: &SqlValue) -> Result<String, WriteError> {
    match value {
        SqlValue::List(_) => Err(WriteError::Unrepresentable(String::from("nested array"))),
        value => Ok(value.to_text()),
    }
}

/// Picks a separator the parser will split on: no element may contain the
/// separator or any separator the parser looks for first.
fn array_separator(texts: &[String]) -> Result<char, WriteError> {
    [',', ';', '\0']
        .into_iter()
        .find(|candidate| {
            ARRAY_SEPARATORS
                .iter()
                .position(|sep| sep == candidate)
                .is_some_and(|rank| {
                    texts
                        .iter()
                        .all(|text| !ARRAY_SEPARATORS[..=rank].iter().any(|sep| text.contains(*sep)))
                })
        })
        .ok_or_else(|| WriteError::NoArraySeparator(texts.join(",")))
}

fn is_simple_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        && !RESERVED.iter().any(|word| word.eq_ignore_ascii_case(text))
}
