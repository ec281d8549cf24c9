//! `{0}` value substitution.

/// Substitutes `value` for every `{0}` in `format`. `{{` and `}}` are
/// literal braces. Returns `None` for any other placeholder or a stray
/// brace.
pub(super) fn apply_format(format: &str, value: &str) -> Option<String> {
    let mut out = String::with_capacity(format.len() + value.len());
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        d => index.push(d),
                    }
                }
                if index.trim() != "0" {
                    return None;
                }
                out.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return None,
            c => out.push(c),
        }
    }

    Some(out)
}

/// Doubles every brace so `text` survives [`apply_format`] unchanged.
pub(super) fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_every_placeholder() {
        assert_eq!(apply_format("{0}+{0}", "2").as_deref(), Some("2+2"));
        assert_eq!(apply_format(" WHERE {0}", "a=1").as_deref(), Some(" WHERE a=1"));
        assert_eq!(apply_format("plain", "x").as_deref(), Some("plain"));
    }

    #[test]
    fn test_doubled_braces_are_literal() {
        assert_eq!(apply_format("{{{0}}}", "v").as_deref(), Some("{v}"));
        assert_eq!(apply_format("{{0}}", "v").as_deref(), Some("{0}"));
    }

    #[test]
    fn test_invalid_formats() {
        assert_eq!(apply_format("{1}", "v"), None);
        assert_eq!(apply_format("{0", "v"), None);
        assert_eq!(apply_format("a}b", "v"), None);
    }

    #[test]
    fn test_escape_braces_round_trips() {
        let text = "{x}";
        assert_eq!(apply_format(&escape_braces(text), "v").as_deref(), Some(text));
    }
}
