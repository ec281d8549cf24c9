//! Views file and variable bindings.
//!
//! A views file is a JSON array:
//!
//! ```json
//! [
//!   {
//!     "name": "people",
//!     "template": "SELECT @columns FROM person p@where[ WHERE {0}]",
//!     "fields": { "name": "p.full_name" }
//!   }
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use relex_core::ast::{Literal, TypeCode};
use relex_core::builder::View;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

/// One entry of a views file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewConfig {
    /// View name, matched against query table names.
    pub name: String,
    /// SELECT template.
    #[serde(default)]
    pub template: Option<String>,
    /// Field name to column expression mapping.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl From<ViewConfig> for View {
    fn from(config: ViewConfig) -> Self {
        Self {
            name: config.name,
            template: config.template,
            field_mapping: config.fields,
        }
    }
}

/// Parses views from JSON text.
pub fn parse_views(text: &str, path: &Path) -> Result<Vec<View>> {
    let configs: Vec<ViewConfig> = serde_json::from_str(text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(configs.into_iter().map(View::from).collect())
}

/// Loads views from a JSON file.
pub fn load_views(path: &Path) -> Result<Vec<View>> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let views = parse_views(&text, path)?;
    debug!(path = %path.display(), count = views.len(), "loaded views");
    Ok(views)
}

/// Parses a `name=value` or `name:Type=value` variable binding. Untyped
/// values are inferred like bare Relex constants.
pub fn parse_binding(text: &str) -> Result<(String, Literal)> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| CliError::InvalidBinding(text.to_owned()))?;
    let (name, type_name) = match key.split_once(':') {
        Some((name, type_name)) => (name.trim(), Some(type_name.trim())),
        None => (key.trim(), None),
    };
    if name.is_empty() {
        return Err(CliError::InvalidBinding(text.to_owned()));
    }

    let literal = match type_name {
        Some(type_name) => {
            let type_code =
                TypeCode::from_name(type_name).ok_or_else(|| CliError::UnknownType {
                    name: name.to_owned(),
                    type_name: type_name.to_owned(),
                })?;
            let value = type_code
                .convert(value)
                .map_err(|reason| CliError::InvalidValue {
                    name: name.to_owned(),
                    reason,
                })?;
            Literal::typed(value, type_code)
        }
        None => {
            let (type_code, value) = TypeCode::infer(value);
            Literal::typed(value, type_code)
        }
    };
    Ok((name.to_owned(), literal))
}
