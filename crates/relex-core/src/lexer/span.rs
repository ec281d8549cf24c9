//! Source location tracking for tokens and parse errors.

/// A byte range in the Relex input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merges two spans into one that covers both.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns up to `radius` characters of context on each side of the
    /// span, clamped to the input and to character boundaries.
    #[must_use]
    pub fn excerpt(self, input: &str, radius: usize) -> &str {
        let start = input[..self.start.min(input.len())]
            .char_indices()
            .rev()
            .nth(radius.saturating_sub(1))
            .map_or(0, |(i, _)| i);
        let tail = &input[self.end.min(input.len())..];
        let end = self.end.min(input.len())
            + tail
                .char_indices()
                .nth(radius)
                .map_or(tail.len(), |(i, _)| i);
        &input[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(5, 5).is_empty());
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(5, 10).merge(Span::new(8, 15));
        assert_eq!(merged, Span::new(5, 15));
    }

    #[test]
    fn test_span_excerpt() {
        let input = "users(id = 1)[*]";
        assert_eq!(Span::new(6, 8).excerpt(input, 3), "rs(id = ");
        assert_eq!(Span::new(0, 5).excerpt(input, 2), "users(i");
        assert_eq!(Span::new(16, 16).excerpt(input, 4), ")[*]");
    }
}
