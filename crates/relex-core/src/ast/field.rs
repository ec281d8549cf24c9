//! Field, table and sort references.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Characters that turn a field string into a computed expression.
const EXPRESSION_MARKERS: &[char] = &['(', ')', '+', '-', '*', '/'];

static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+as\s+([A-Za-z_][A-Za-z0-9_]*)\s*$").expect("alias pattern is valid")
});

/// A reference to a column or a computed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    /// Field name (the alias for computed fields).
    pub name: String,
    /// Table name or alias qualifier.
    pub prefix: Option<String>,
    /// Verbatim SQL expression.
    pub expression: Option<String>,
    /// Aggregate function name when the field was built by
    /// [`FieldRef::aggregate`].
    pub aggregate: Option<String>,
}

impl FieldRef {
    /// Creates a plain field reference without parsing.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            expression: None,
            aggregate: None,
        }
    }

    /// Creates a qualified field reference.
    #[must_use]
    pub fn qualified(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new(name)
        }
    }

    /// Creates a computed field with an explicit name.
    #[must_use]
    pub fn computed(expression: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            expression: Some(expression.into()),
            ..Self::new(name)
        }
    }

    /// Creates an aggregate field: `expression = fn(arg1,arg2,...)`.
    #[must_use]
    pub fn aggregate(name: impl Into<String>, function: &str, args: &[Self]) -> Self {
        let args = args
            .iter()
            .map(Self::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            expression: Some(format!("{function}({args})")),
            aggregate: Some(function.to_owned()),
            ..Self::new(name)
        }
    }

    /// Parses a field string.
    ///
    /// A string containing any of `()+-*/` is an expression; its name is
    /// taken from a trailing `as <identifier>` or is the expression text.
    /// Otherwise the text is split into prefix and name at the last dot.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.contains(EXPRESSION_MARKERS) {
            return match ALIAS_RE.captures(text) {
                Some(caps) => {
                    let alias_start = caps.get(0).map_or(text.len(), |m| m.start());
                    Self::computed(text[..alias_start].trim_end(), &caps[1])
                }
                None => Self::computed(text, text),
            };
        }
        match text.rsplit_once('.') {
            Some((prefix, name)) => Self::qualified(prefix, name),
            None => Self::new(text),
        }
    }

    /// Returns true if the field is a computed expression.
    #[must_use]
    pub const fn is_expression(&self) -> bool {
        self.expression.is_some()
    }

    /// Returns true if the field carries an alias distinct from its
    /// expression text.
    #[must_use]
    pub fn is_aliased(&self) -> bool {
        self.expression.as_deref().is_some_and(|e| e != self.name)
    }

    /// Returns true if the field was built from an aggregate function.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        self.aggregate.is_some()
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.expression, &self.prefix) {
            (Some(expr), _) => f.write_str(expr),
            (None, Some(prefix)) => write!(f, "{prefix}.{}", self.name),
            (None, None) => f.write_str(&self.name),
        }
    }
}

impl From<&str> for FieldRef {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// A reference to the queried table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Table name.
    pub name: String,
    /// Optional alias.
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates a table reference without alias and without parsing.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Parses `name` or `name.alias` (split at the last dot).
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim().rsplit_once('.') {
            Some((name, alias)) => Self::new(name).with_alias(alias),
            None => Self::new(text.trim()),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}.{alias}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for TableRef {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parses `asc`, `ascending`, `desc` or `descending` (case-insensitive).
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// The sorted field.
    pub field: FieldRef,
    /// Direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on a field.
    #[must_use]
    pub fn asc(field: impl Into<FieldRef>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a field.
    #[must_use]
    pub fn desc(field: impl Into<FieldRef>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parses `field [asc|ascending|desc|descending]`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some((field, word)) = text.rsplit_once(char::is_whitespace) {
            if let Some(direction) = SortDirection::from_keyword(word) {
                return Self {
                    field: FieldRef::parse(field),
                    direction,
                };
            }
        }
        Self::asc(FieldRef::parse(text))
    }
}

impl From<&str> for SortSpec {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}
