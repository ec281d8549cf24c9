//! Conditional string templates.
//!
//! A template is literal text with tokens introduced by a sigil:
//!
//! - `@name` or `@(any name)` is replaced by the resolved value;
//! - `@name[present]` formats a non-empty value with `present`, where `{0}`
//!   stands for the value;
//! - `@name[present;absent]` also formats an empty or missing value with
//!   `absent`;
//! - `@@` is a literal sigil.
//!
//! Inside a clause, `\` escapes any of `; ] [ \ @ { }`, and `;;`, `]]`,
//! `@@`, `{{`, `}}` are literal. With nested tokens enabled a clause may
//! itself contain tokens, which are resolved first.
//!
//! ```rust
//! use relex_core::template::{Resolved, StringTemplate};
//!
//! let sql = StringTemplate::new()
//!     .format("DELETE FROM @table@where[ WHERE {0}]", |name| match name {
//!         "table" => Resolved::from("users"),
//!         "where" => Resolved::NotApplicable,
//!         _ => Resolved::Undefined,
//!     })
//!     .unwrap();
//! assert_eq!(sql, "DELETE FROM users");
//! ```

mod format;

use self::format::{apply_format, escape_braces};
use crate::error::TemplateError;

/// Characters a backslash escapes inside a clause, besides the sigil.
const ESCAPABLE: &[char] = &[';', ']', '[', '\\', '@'];

/// Outcome of resolving a token name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The name is unknown: the token is kept verbatim, or dropped when
    /// missing tokens are replaced.
    Undefined,
    /// The name is known but produces no output, clause included.
    NotApplicable,
    /// A value; `None` or empty selects the absent format.
    Value(Option<String>),
}

impl From<&str> for Resolved {
    fn from(value: &str) -> Self {
        Self::Value(Some(String::from(value)))
    }
}

impl From<String> for Resolved {
    fn from(value: String) -> Self {
        Self::Value(Some(value))
    }
}

impl From<Option<String>> for Resolved {
    fn from(value: Option<String>) -> Self {
        Self::Value(value)
    }
}

/// Template engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringTemplate {
    sigil: char,
    replace_missing: bool,
    nested_tokens: bool,
    recursion_depth: usize,
}

impl Default for StringTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl StringTemplate {
    /// Creates an engine with sigil `@`, missing tokens kept verbatim, no
    /// nested tokens and no re-formatting of values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sigil: '@',
            replace_missing: false,
            nested_tokens: false,
            recursion_depth: 1,
        }
    }

    /// Sets the token sigil.
    #[must_use]
    pub const fn with_sigil(mut self, sigil: char) -> Self {
        self.sigil = sigil;
        self
    }

    /// Renders undefined tokens as empty text instead of verbatim.
    #[must_use]
    pub const fn replace_missing(mut self, replace: bool) -> Self {
        self.replace_missing = replace;
        self
    }

    /// Allows tokens inside formatting clauses.
    #[must_use]
    pub const fn nested_tokens(mut self, nested: bool) -> Self {
        self.nested_tokens = nested;
        self
    }

    /// Sets how many times a template is rendered when substituted values
    /// contain the sigil. `1` renders values as-is.
    #[must_use]
    pub const fn recursion_depth(mut self, depth: usize) -> Self {
        self.recursion_depth = depth;
        self
    }

    /// Renders `template`, asking `resolver` for the value of each token.
    pub fn format<F>(&self, template: &str, mut resolver: F) -> Result<String, TemplateError>
    where
        F: FnMut(&str) -> Resolved,
    {
        self.render(template, &mut resolver, 0)
    }

    fn render(
        &self,
        template: &str,
        resolver: &mut dyn FnMut(&str) -> Resolved,
        depth: usize,
    ) -> Result<String, TemplateError> {
        let mut scanner = Scanner::new(template);
        let mut out = String::with_capacity(template.len());

        while let Some(c) = scanner.peek() {
            if c != self.sigil {
                scanner.bump();
                out.push(c);
            } else if scanner.peek_next() == Some(self.sigil) {
                scanner.bump();
                scanner.bump();
                out.push(c);
            } else if let Some(text) = self.token(&mut scanner, resolver, 0, depth)? {
                out.push_str(&text);
            } else {
                scanner.bump();
                out.push(c);
            }
        }

        Ok(out)
    }

    /// Renders the token at the scanner position. Returns `None`, consuming
    /// nothing, if the sigil does not start a token.
    fn token(
        &self,
        scanner: &mut Scanner<'_>,
        resolver: &mut dyn FnMut(&str) -> Resolved,
        level: usize,
        depth: usize,
    ) -> Result<Option<String>, TemplateError> {
        let text = scanner.text;
        let start = scanner.pos;

        let name = match scanner.peek_next() {
            Some('(') => {
                scanner.bump();
                scanner.bump();
                let name_start = scanner.pos;
                loop {
                    match scanner.bump() {
                        Some(')') => break,
                        Some(_) => {}
                        None => return Err(TemplateError::UnclosedName { position: start }),
                    }
                }
                &text[name_start..scanner.pos - 1]
            }
            Some(c) if is_name_char(c) => {
                scanner.bump();
                let name_start = scanner.pos;
                while scanner.peek().is_some_and(is_name_char) {
                    scanner.bump();
                }
                &text[name_start..scanner.pos]
            }
            _ => return Ok(None),
        };

        let (present, absent) = if scanner.peek() == Some('[') {
            self.clause(scanner, name, resolver, level, depth)?
        } else {
            (String::from("{0}"), String::new())
        };

        let rendered = match resolver(name) {
            Resolved::Undefined if self.replace_missing => String::new(),
            Resolved::Undefined => String::from(&text[start..scanner.pos]),
            Resolved::NotApplicable => String::new(),
            Resolved::Value(value) => {
                let mut value = value.unwrap_or_default();
                if depth + 1 < self.recursion_depth && value.contains(self.sigil) {
                    value = self.render(&value, resolver, depth + 1)?;
                }
                let format = if value.is_empty() { &absent } else { &present };
                apply_format(format, &value).ok_or_else(|| TemplateError::InvalidFormat {
                    token: String::from(name),
                    format: format.clone(),
                    position: start,
                })?
            }
        };
        Ok(Some(rendered))
    }

    /// Parses a `[present;absent]` clause into its two format strings.
    fn clause(
        &self,
        scanner: &mut Scanner<'_>,
        token: &str,
        resolver: &mut dyn FnMut(&str) -> Resolved,
        level: usize,
        depth: usize,
    ) -> Result<(String, String), TemplateError> {
        let open = scanner.pos;
        scanner.bump(); // [
        let mut present: Option<String> = None;
        let mut current = String::new();

        loop {
            let Some(c) = scanner.peek() else {
                return Err(TemplateError::UnclosedClause {
                    token: String::from(token),
                    position: open,
                });
            };
            scanner.bump();
            match c {
                '\\' => match scanner.bump() {
                    Some(e @ ('{' | '}')) => {
                        current.push(e);
                        current.push(e);
                    }
                    Some(e) if e == self.sigil || ESCAPABLE.contains(&e) => current.push(e),
                    Some(e) => {
                        current.push('\\');
                        current.push(e);
                    }
                    None => {
                        return Err(TemplateError::UnclosedClause {
                            token: String::from(token),
                            position: open,
                        });
                    }
                },
                ';' if scanner.peek() == Some(';') => {
                    scanner.bump();
                    current.push(';');
                }
                ';' => {
                    if present.is_some() {
                        return Err(TemplateError::TooManySegments {
                            token: String::from(token),
                            position: scanner.pos - 1,
                        });
                    }
                    present = Some(core::mem::take(&mut current));
                }
                ']' if level == 0 && scanner.peek() == Some(']') => {
                    scanner.bump();
                    current.push(']');
                }
                ']' => break,
                '{' | '}' => {
                    if scanner.peek() == Some(c) {
                        scanner.bump();
                        current.push(c);
                    }
                    current.push(c);
                }
                c if c == self.sigil && scanner.peek() == Some(c) => {
                    scanner.bump();
                    current.push(c);
                }
                c if c == self.sigil && self.nested_tokens => {
                    scanner.pos -= c.len_utf8();
                    match self.token(scanner, resolver, level + 1, depth)? {
                        Some(text) => current.push_str(&escape_braces(&text)),
                        None => {
                            scanner.bump();
                            current.push(c);
                        }
                    }
                }
                c => current.push(c),
            }
        }

        Ok(match present {
            Some(present) => (present, current),
            None => (current, String::new()),
        })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Character cursor over a template.
struct Scanner<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Scanner<'t> {
    const fn new(text: &'t str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl FnMut(&str) -> Resolved + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map_or(Resolved::Undefined, |(_, value)| Resolved::from(*value))
        }
    }

    fn render(template: &str, pairs: &[(&str, &str)]) -> Result<String, TemplateError> {
        StringTemplate::new().format(template, values(pairs))
    }

    #[test]
    fn test_plain_tokens() {
        assert_eq!(
            render("SELECT @columns FROM @table", &[("columns", "*"), ("table", "users")]).unwrap(),
            "SELECT * FROM users"
        );
        assert_eq!(render("@(my name)!", &[("my name", "x")]).unwrap(), "x!");
    }

    #[test]
    fn test_missing_tokens() {
        assert_eq!(render("a @b[x{0}] c", &[]).unwrap(), "a @b[x{0}] c");
        let text = StringTemplate::new()
            .replace_missing(true)
            .format("a @b[x{0}] c", values(&[]))
            .unwrap();
        assert_eq!(text, "a  c");
    }

    #[test]
    fn test_present_and_absent_formats() {
        assert_eq!(render("@x[yes {0};no]", &[("x", "1")]).unwrap(), "yes 1");
        assert_eq!(render("@x[yes {0};no]", &[("x", "")]).unwrap(), "no");
        assert_eq!(render("@x[ WHERE {0}]", &[("x", "")]).unwrap(), "");
        let text = StringTemplate::new()
            .format("@x[a;b]", |_| Resolved::Value(None))
            .unwrap();
        assert_eq!(text, "b");
    }

    #[test]
    fn test_not_applicable_drops_clause() {
        let text = StringTemplate::new()
            .format("SELECT 1@orderby[ ORDER BY {0};ignored]", |_| {
                Resolved::NotApplicable
            })
            .unwrap();
        assert_eq!(text, "SELECT 1");
    }

    #[test]
    fn test_sigil_escape() {
        assert_eq!(render("@@name", &[("name", "x")]).unwrap(), "@name");
        assert_eq!(render("a @ b", &[]).unwrap(), "a @ b");
    }

    #[test]
    fn test_clause_escapes() {
        let pairs = [("x", "v")];
        assert_eq!(render(r"@x[a\;b]", &pairs).unwrap(), "a;b");
        assert_eq!(render("@x[a;;b]", &pairs).unwrap(), "a;b");
        assert_eq!(render("@x[[{0}]]]", &pairs).unwrap(), "[v]");
        assert_eq!(render(r"@x[\[{0}\]]", &pairs).unwrap(), "[v]");
        assert_eq!(render(r"@x[\{{0}\}]", &pairs).unwrap(), "{v}");
        assert_eq!(render("@x[{{{0}}}]", &pairs).unwrap(), "{v}");
        assert_eq!(render(r"@x[\@{0}@@]", &pairs).unwrap(), "@v@");
        assert_eq!(render(r"@x[a\\b]", &pairs).unwrap(), r"a\b");
    }

    #[test]
    fn test_nested_tokens() {
        let engine = StringTemplate::new().nested_tokens(true);
        let text = engine
            .format("@A[@B[{0}+{0}]]", values(&[("A", "1"), ("B", "2")]))
            .unwrap();
        assert_eq!(text, "2+2");

        let text = engine
            .format("@A[<@B>{0}]", values(&[("A", "1"), ("B", "{x}")]))
            .unwrap();
        assert_eq!(text, "<{x}>1");

        let text = engine
            .format("@A[@B[x]]", values(&[("A", "1")]))
            .unwrap();
        assert_eq!(text, "@B[x]");
    }

    #[test]
    fn test_recursion_depth() {
        let pairs = [("x", "@y"), ("y", "Y")];
        assert_eq!(render("@x", &pairs).unwrap(), "@y");
        let text = StringTemplate::new()
            .recursion_depth(2)
            .format("@x", values(&pairs))
            .unwrap();
        assert_eq!(text, "Y");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            render("a @x[b", &[("x", "v")]),
            Err(TemplateError::UnclosedClause {
                token: String::from("x"),
                position: 4
            })
        );
        assert!(matches!(
            render("@x[a;b;c]", &[("x", "v")]),
            Err(TemplateError::TooManySegments { position: 6, .. })
        ));
        assert!(matches!(
            render("@(x", &[]),
            Err(TemplateError::UnclosedName { position: 0 })
        ));
        assert!(matches!(
            render("@x[{1}]", &[("x", "v")]),
            Err(TemplateError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_custom_sigil() {
        let text = StringTemplate::new()
            .with_sigil('$')
            .format("$a @b $$", values(&[("a", "1")]))
            .unwrap();
        assert_eq!(text, "1 @b $");
    }
}
