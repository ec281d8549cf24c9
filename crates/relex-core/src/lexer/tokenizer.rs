//! Relex tokenizer implementation.

use super::{Span, Token, TokenKind};

/// Characters that end an unquoted constant.
const DELIMITERS: &[char] = &[
    '(', ')', '[', ']', ';', ':', ',', '=', '<', '>', '!', '*', '{', '}', '&', '|',
];

/// A lexer that tokenizes Relex input.
pub struct Lexer<'a> {
    /// The input text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Whether an unquoted constant may run to the end of input.
    trailing_constant: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            trailing_constant: false,
        }
    }

    /// Accepts an unquoted constant at the very end of input. A full query
    /// always closes with a delimiter, a bare condition may not.
    #[must_use]
    pub const fn allow_trailing_constant(mut self) -> Self {
        self.trailing_constant = true;
        self
    }

    /// Returns the input text.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances if the current character is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    /// Scans a name: a letter or underscore followed by alphanumerics,
    /// underscores and dots.
    fn scan_name(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            self.advance();
        }
        let text = &self.input[self.start..self.pos];
        self.make_token(TokenKind::Name(String::from(text)))
    }

    /// Scans a double-quoted constant.
    fn scan_quoted(&mut self) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => {
                    if self.eat('"') {
                        value.push('"');
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Unterminated quoted constant",
                    )));
                }
            }
        }

        self.make_token(TokenKind::Quoted(value))
    }

    /// Scans an unquoted constant up to whitespace, a delimiter or a quote.
    fn scan_constant(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && c != '"' && !DELIMITERS.contains(&c))
        {
            self.advance();
        }
        if self.peek().is_none() && !self.trailing_constant {
            return self.make_token(TokenKind::Error(String::from(
                "Unterminated constant",
            )));
        }
        let text = &self.input[self.start..self.pos];
        self.make_token(TokenKind::Constant(String::from(text)))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => self.make_token(TokenKind::Colon),
            '*' => self.make_token(TokenKind::Star),

            // Longest match first
            '=' => {
                self.eat('=');
                self.make_token(TokenKind::Eq)
            }
            '!' => {
                if self.eat('=') {
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Bang)
                }
            }
            '<' => {
                if self.eat('=') {
                    self.make_token(TokenKind::LtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.eat('=') {
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '&' => {
                self.eat('&');
                self.make_token(TokenKind::And)
            }
            '|' => {
                self.eat('|');
                self.make_token(TokenKind::Or)
            }

            '"' => {
                self.pos = self.start;
                self.scan_quoted()
            }

            c if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.pos = self.start;
                self.scan_constant()
            }

            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_name()
            }

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn name(text: &str) -> TokenKind {
        TokenKind::Name(String::from(text))
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("   \n\t  ");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_names_with_dots() {
        assert_eq!(
            token_kinds("users.u _id u.name"),
            vec![name("users.u"), name("_id"), name("u.name"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_quoted_with_escaped_quote() {
        assert_eq!(
            token_kinds(r#""say ""hi""""#),
            vec![TokenKind::Quoted(String::from(r#"say "hi""#)), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_quoted() {
        let tokens = tokenize("name = \"abc");
        assert!(matches!(&tokens[2].kind, TokenKind::Error(m) if m.contains("quoted")));
    }

    #[test]
    fn test_constants_end_at_delimiters() {
        assert_eq!(
            token_kinds("{-1.5,10}"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::Constant(String::from("-1.5")),
                TokenKind::Comma,
                TokenKind::Constant(String::from("10")),
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_constant_at_end_of_input() {
        let tokens = tokenize("age > 18");
        assert!(matches!(&tokens[2].kind, TokenKind::Error(_)));

        let tokens = Lexer::new("age > 18").allow_trailing_constant().tokenize();
        assert_eq!(tokens[2].kind, TokenKind::Constant(String::from("18")));
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            token_kinds("= == != <> < <= > >= ! && || & |"),
            vec![
                TokenKind::Eq,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Bang,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_negated_in() {
        assert_eq!(
            token_kinds("id !in x"),
            vec![name("id"), TokenKind::Bang, name("in"), name("x"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_typed_quoted_constant() {
        assert_eq!(
            token_kinds(r#""1,2":int32[]"#),
            vec![
                TokenKind::Quoted(String::from("1,2")),
                TokenKind::Colon,
                name("int32"),
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("users[*]");
        assert_eq!(tokens[0].span, Span::new(0, 5));
        assert_eq!(tokens[1].span, Span::new(5, 6));
        assert_eq!(tokens[2].span, Span::new(6, 7));
    }
}
