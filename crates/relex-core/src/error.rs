//! Error types for query parsing, compilation and templating.

use thiserror::Error;

pub use crate::parser::ParseError;

/// Reading a variable that has no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// The variable was never bound, or was unset.
    #[error("variable '{name}' is not bound")]
    Unbound {
        /// Variable name.
        name: String,
    },
}

/// SQL expression compiler errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A subquery value was found but no resolver was configured.
    #[error("subquery on table '{table}' found but no subquery resolver is configured")]
    MissingSubqueryResolver {
        /// Table of the unresolved subquery.
        table: String,
    },

    /// An operator combination with no SQL rendering.
    #[error("invalid condition operator {op} on '{lvalue}'")]
    InvalidCondition {
        /// Rendered left operand.
        lvalue: String,
        /// Operator flags, as debug text.
        op: String,
    },

    /// INSERT or UPDATE with nothing to write.
    #[error("empty changeset for table '{0}'")]
    EmptyChangeset(String),

    /// A variable operand had no value.
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// A statement template failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// String template errors. Positions are byte offsets in the template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A formatting clause was opened and never closed.
    #[error("unclosed formatting clause for token '{token}' at position {position}")]
    UnclosedClause {
        /// Token name.
        token: String,
        /// Position of the opening bracket.
        position: usize,
    },

    /// An `@(` token was never closed.
    #[error("unclosed token name at position {position}")]
    UnclosedName {
        /// Position of the sigil.
        position: usize,
    },

    /// A formatting clause has more than two `;`-separated segments.
    #[error("too many format segments for token '{token}' at position {position}")]
    TooManySegments {
        /// Token name.
        token: String,
        /// Position of the extra separator.
        position: usize,
    },

    /// A formatting clause contains an invalid `{..}` placeholder.
    #[error("invalid format '{format}' for token '{token}' at position {position}")]
    InvalidFormat {
        /// Token name.
        token: String,
        /// The offending format text.
        format: String,
        /// Position of the formatting clause.
        position: usize,
    },
}

/// Relex builder errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// Every array separator occurs inside some element.
    #[error("array elements contain every separator character: {0}")]
    NoArraySeparator(String),

    /// An operator combination or nested array with no Relex spelling.
    #[error("value has no Relex representation: {0}")]
    Unrepresentable(String),
}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Relex parse error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Template error.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Compilation error.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Unbound variable.
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// Relex builder error.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
