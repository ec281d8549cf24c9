//! Rendering compiled commands for the terminal.

use std::fmt::Write;

use relex_core::ast::SqlValue;
use relex_core::builder::SqlCommand;
use serde::Serialize;

/// JSON shape of a compiled command.
#[derive(Debug, Serialize)]
pub struct CommandOutput<'a> {
    /// SQL text.
    pub sql: &'a str,
    /// Parameters in placeholder order.
    pub parameters: Vec<ParameterOutput<'a>>,
}

/// JSON shape of one parameter.
#[derive(Debug, Serialize)]
pub struct ParameterOutput<'a> {
    /// Placeholder, e.g. `@p0`.
    pub name: &'a str,
    /// Type name, e.g. `Int32`.
    #[serde(rename = "type")]
    pub type_name: &'static str,
    /// Bound value.
    pub value: serde_json::Value,
}

impl<'a> From<&'a SqlCommand> for CommandOutput<'a> {
    fn from(command: &'a SqlCommand) -> Self {
        Self {
            sql: &command.text,
            parameters: command
                .parameters
                .iter()
                .map(|param| ParameterOutput {
                    name: &param.placeholder,
                    type_name: param.type_code.as_str(),
                    value: json_value(&param.value),
                })
                .collect(),
        }
    }
}

fn json_value(value: &SqlValue) -> serde_json::Value {
    match value {
        SqlValue::Null => serde_json::Value::Null,
        SqlValue::Bool(b) => serde_json::Value::Bool(*b),
        SqlValue::Int(n) => serde_json::Value::from(*n),
        SqlValue::Float(f) => serde_json::Value::from(*f),
        SqlValue::List(items) => items.iter().map(json_value).collect(),
        SqlValue::Decimal(_) | SqlValue::Text(_) | SqlValue::DateTime(_) => {
            serde_json::Value::String(value.to_text())
        }
    }
}

/// Renders a command as JSON.
pub fn to_json(command: &SqlCommand) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CommandOutput::from(command))
}

/// Renders a command as its SQL text followed by one
/// `-- <placeholder> <type> = <value>` line per parameter.
#[must_use]
pub fn to_text(command: &SqlCommand) -> String {
    let mut out = command.text.clone();
    for param in &command.parameters {
        let _ = write!(
            out,
            "\n-- {} {} = {}",
            param.placeholder,
            param.type_code,
            param.value.to_text()
        );
    }
    out
}
