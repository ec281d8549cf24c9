//! Error types for the command-line front end.

use std::path::PathBuf;

/// Errors raised while reading CLI input and configuration.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A `--var` argument is not `name=value` or `name:Type=value`.
    #[error("Invalid variable binding '{0}': expected name=value or name:Type=value")]
    InvalidBinding(String),

    /// A `--var` type name is not a known type.
    #[error("Unknown type '{type_name}' in binding for variable '{name}'")]
    UnknownType {
        /// Variable name.
        name: String,
        /// The unknown type name.
        type_name: String,
    },

    /// A `--var` value does not convert to its declared type.
    #[error("Invalid value for variable '{name}': {reason}")]
    InvalidValue {
        /// Variable name.
        name: String,
        /// Conversion failure.
        reason: String,
    },

    /// IO error reading the views file.
    #[error("Failed to read views file '{path}': {source}")]
    Io {
        /// Path to the views file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Parsing, compiling or formatting the query failed.
    #[error(transparent)]
    Relex(#[from] relex_core::Error),

    /// The views file is not valid JSON.
    #[error("Failed to parse views file '{path}': {source}")]
    Json {
        /// Path to the views file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Result type alias for CLI helpers.
pub type Result<T> = std::result::Result<T, CliError>;
