//! Relex parser implementation.

use super::error::ParseError;
use crate::ast::{
    Conditions, Connective, FieldRef, Literal, Node, Query, SortDirection, SortSpec, SqlValue,
    TableRef, TypeCode, Value,
};
use crate::lexer::{Lexer, Span, Token, TokenKind};

/// Array element separators, in the order they are looked for.
pub(crate) const ARRAY_SEPARATORS: [char; 4] = ['\0', ';', ',', '\t'];

/// Splits array literal text on the first separator present.
pub(crate) fn split_array(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![];
    }
    match ARRAY_SEPARATORS.iter().find(|sep| text.contains(**sep)) {
        Some(sep) => text.split(*sep).collect(),
        None => vec![text],
    }
}

/// Relex parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    next: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::from_lexer(Lexer::new(input))
    }

    fn from_lexer(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let next = lexer.next_token();
        Self {
            lexer,
            current,
            next,
        }
    }

    /// Parses the whole input as a query:
    /// `table ["(" condition ")"] "[" fields [";" sorts] "]" ["{" offset "," [count] "}"]`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid Relex query.
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        let query = self.query()?;
        self.expect(&TokenKind::Eof, "end of input")?;
        tracing::trace!(table = %query.table, "parsed relex query");
        Ok(query)
    }

    /// Parses the whole input as a bare condition expression, such as
    /// `age >= 18 and name like "A%"`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid condition.
    pub fn parse_condition(&mut self) -> Result<Node, ParseError> {
        *self = Self::from_lexer(Lexer::new(self.lexer.input()).allow_trailing_constant());
        let node = self.chain()?.0;
        self.expect(&TokenKind::Eof, "end of input")?;
        Ok(node)
    }

    fn query(&mut self) -> Result<Query, ParseError> {
        let table = match self.current.kind.clone() {
            TokenKind::Name(name) => {
                self.advance();
                TableRef::parse(&name)
            }
            TokenKind::Quoted(name) => {
                self.advance();
                self.expect(&TokenKind::Colon, "':'")?;
                self.expect_word("table")?;
                TableRef::parse(&name)
            }
            _ => return Err(self.unexpected("table name")),
        };
        self.query_from(table)
    }

    /// Parses the rest of a query once its table is known.
    fn query_from(&mut self, table: TableRef) -> Result<Query, ParseError> {
        let mut query = Query::new(table);

        if self.eat(&TokenKind::LeftParen) {
            query.condition = Some(self.parenthesized()?);
        }

        self.expect(&TokenKind::LeftBracket, "'['")?;
        query.fields = self.field_list()?;
        if self.eat(&TokenKind::Semicolon) {
            query.sort = Some(self.sort_list()?);
        }
        self.expect(&TokenKind::RightBracket, "']'")?;

        if self.eat(&TokenKind::LeftBrace) {
            query.record_offset = self.number()?;
            self.expect(&TokenKind::Comma, "','")?;
            if !self.check(&TokenKind::RightBrace) {
                query.record_count = Some(self.number()?);
            }
            self.expect(&TokenKind::RightBrace, "'}'")?;
        }

        Ok(query)
    }

    // --- Conditions ---

    /// Parses the inside of a parenthesis, after the `(`, up to and
    /// including the matching `)`.
    fn parenthesized(&mut self) -> Result<Node, ParseError> {
        let (label, node) = self.group_body()?;
        Ok(match label {
            Some(label) => node.named(label),
            None => node,
        })
    }

    /// Parses an optional `<name>` label, then a condition chain (or
    /// nothing, giving an empty AND group), then `)`.
    fn group_body(&mut self) -> Result<(Option<String>, Node), ParseError> {
        let label = if self.check(&TokenKind::Lt) {
            self.advance();
            let name = match self.current.kind.clone() {
                TokenKind::Name(name) | TokenKind::Quoted(name) => name,
                _ => return Err(self.error("Malformed node name label")),
            };
            self.advance();
            if !self.eat(&TokenKind::Gt) {
                return Err(self.error("Malformed node name label"));
            }
            Some(name)
        } else {
            None
        };

        let node = if self.check(&TokenKind::RightParen) {
            Node::all(vec![])
        } else {
            self.chain()?.0
        };
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok((label, node))
    }

    /// Parses `term (connective chain)?`. The second element is the
    /// connective of the group the chain built, if it built one; only
    /// such groups are merged into an enclosing chain of the same
    /// connective.
    fn chain(&mut self) -> Result<(Node, Option<Connective>), ParseError> {
        let term = self.term()?;
        let Some(connective) = self.connective() else {
            return Ok((term, None));
        };
        let (rest, rest_connective) = self.chain()?;
        let children = match rest {
            Node::Group(group) if rest_connective == Some(connective) => {
                let mut children = vec![term];
                children.extend(group.children);
                children
            }
            rest => vec![term, rest],
        };
        Ok((Node::group(connective, children), Some(connective)))
    }

    fn connective(&mut self) -> Option<Connective> {
        let connective = match &self.current.kind {
            TokenKind::And => Connective::And,
            TokenKind::Or => Connective::Or,
            kind if kind.is_word("and") => Connective::And,
            kind if kind.is_word("or") => Connective::Or,
            _ => return None,
        };
        self.advance();
        Some(connective)
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        match self.current.kind {
            TokenKind::LeftParen => {
                self.advance();
                self.parenthesized()
            }
            TokenKind::Bang if self.next.kind == TokenKind::LeftParen => {
                self.advance();
                self.advance();
                let (label, child) = self.group_body()?;
                let node = Node::negate(child);
                Ok(match label {
                    Some(label) => node.named(label),
                    None => node,
                })
            }
            _ => self.condition(),
        }
    }

    fn condition(&mut self) -> Result<Node, ParseError> {
        if self.at_null() {
            return Err(self.error("null is only allowed on the right-hand side of a condition"));
        }
        let lvalue = self.value()?;
        if let Value::RawSql(text) = &lvalue {
            if !self.at_operator() {
                return Ok(Node::raw(text.clone()));
            }
        }

        let op = self.operator()?;

        if self.at_null() {
            if op.base() != Conditions::EQUAL {
                return Err(self.error("null can only be compared with an equality operator"));
            }
            self.advance();
            return Ok(Node::condition(lvalue, op, Value::null()));
        }

        let rvalue = self.value()?;
        Ok(Node::condition(lvalue, op, rvalue))
    }

    fn at_null(&self) -> bool {
        self.current.kind.is_word("null")
            && !matches!(
                self.next.kind,
                TokenKind::LeftParen | TokenKind::LeftBracket
            )
    }

    fn at_operator(&self) -> bool {
        match &self.current.kind {
            TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::Bang => true,
            kind => kind.is_word("in") || kind.is_word("like"),
        }
    }

    /// Parses an operator with an optional leading `!`.
    fn operator(&mut self) -> Result<Conditions, ParseError> {
        let negated = self.eat(&TokenKind::Bang);
        let op = match &self.current.kind {
            TokenKind::Eq => Conditions::EQUAL,
            TokenKind::NotEq => Conditions::EQUAL | Conditions::NOT,
            TokenKind::Lt => Conditions::LESS_THAN,
            TokenKind::LtEq => Conditions::LESS_THAN | Conditions::EQUAL,
            TokenKind::Gt => Conditions::GREATER_THAN,
            TokenKind::GtEq => Conditions::GREATER_THAN | Conditions::EQUAL,
            kind if kind.is_word("in") => Conditions::IN,
            kind if kind.is_word("like") => Conditions::LIKE,
            TokenKind::Name(word) => {
                return Err(self.error(format!("Unknown operator '{word}'")));
            }
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.advance();
        Ok(if negated { op ^ Conditions::NOT } else { op })
    }

    // --- Values ---

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Name(name) => {
                if matches!(
                    self.next.kind,
                    TokenKind::LeftParen | TokenKind::LeftBracket
                ) {
                    return Ok(Value::from(self.query()?));
                }
                self.advance();
                Ok(Value::Field(FieldRef::parse(&name)))
            }
            TokenKind::Constant(text) => {
                self.advance();
                let (type_code, value) = TypeCode::infer(&text);
                Ok(Value::Literal(Literal::typed(value, type_code)))
            }
            TokenKind::Quoted(text) => {
                let span = self.current.span;
                self.advance();
                self.typed_value(text, span)
            }
            _ => Err(self.unexpected("value")),
        }
    }

    /// Parses the optional `:type`, `:type[]`, `:sql`, `:var` or `:table`
    /// suffix of a quoted constant.
    fn typed_value(&mut self, text: String, span: Span) -> Result<Value, ParseError> {
        if !self.eat(&TokenKind::Colon) {
            return Ok(Value::Literal(Literal::new(text)));
        }

        let TokenKind::Name(type_name) = self.current.kind.clone() else {
            return Err(self.unexpected("type name"));
        };
        let type_span = self.current.span;
        self.advance();

        match type_name.to_ascii_lowercase().as_str() {
            "sql" => return Ok(Value::raw(text)),
            "var" => return Ok(Value::variable(text)),
            "table" => return self.query_from(TableRef::parse(&text)).map(Value::from),
            _ => {}
        }

        let input = self.lexer.input();
        let type_code = TypeCode::from_name(&type_name).ok_or_else(|| {
            ParseError::new(format!("Unknown type '{type_name}'"), type_span, input)
        })?;
        let convert = |piece: &str| {
            type_code.convert(piece).map_err(|reason| {
                ParseError::new(
                    format!("Invalid {type_code} constant '{piece}': {reason}"),
                    span.merge(type_span),
                    input,
                )
            })
        };

        if !self.eat_array_brackets() {
            return Ok(Value::Literal(Literal::typed(convert(&text)?, type_code)));
        }
        if self.check(&TokenKind::LeftBracket) {
            return Err(self.error("Too many array brackets in type suffix"));
        }
        let items = split_array(&text)
            .into_iter()
            .map(convert)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Literal(Literal::typed(
            SqlValue::List(items),
            type_code,
        )))
    }

    fn eat_array_brackets(&mut self) -> bool {
        if self.check(&TokenKind::LeftBracket) && self.next.kind == TokenKind::RightBracket {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    // --- Field and sort lists ---

    fn field_list(&mut self) -> Result<Option<Vec<FieldRef>>, ParseError> {
        if self.eat(&TokenKind::Star)
            || self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RightBracket)
        {
            return Ok(None);
        }
        let mut fields = vec![self.field()?];
        while self.eat(&TokenKind::Comma) {
            fields.push(self.field()?);
        }
        Ok(Some(fields))
    }

    fn field(&mut self) -> Result<FieldRef, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Name(text) | TokenKind::Quoted(text) => {
                self.advance();
                Ok(FieldRef::parse(&text))
            }
            _ => Err(self.unexpected("field name")),
        }
    }

    fn sort_list(&mut self) -> Result<Vec<SortSpec>, ParseError> {
        let mut sorts = vec![self.sort()?];
        while self.eat(&TokenKind::Comma) {
            sorts.push(self.sort()?);
        }
        Ok(sorts)
    }

    fn sort(&mut self) -> Result<SortSpec, ParseError> {
        let field = self.field()?;
        let direction = match &self.current.kind {
            TokenKind::Name(word) => match SortDirection::from_keyword(word) {
                Some(direction) => {
                    self.advance();
                    direction
                }
                None => return Err(self.error(format!("Unknown sort direction '{word}'"))),
            },
            _ => SortDirection::Asc,
        };
        Ok(SortSpec { field, direction })
    }

    fn number(&mut self) -> Result<u32, ParseError> {
        let TokenKind::Constant(text) = &self.current.kind else {
            return Err(self.unexpected("record number"));
        };
        let n = text
            .parse::<u32>()
            .map_err(|_| self.error(format!("Invalid record number '{text}'")))?;
        self.advance();
        Ok(n)
    }

    // --- Helper methods ---

    /// Advances to the next token.
    fn advance(&mut self) {
        let next = core::mem::replace(&mut self.next, self.lexer.next_token());
        self.current = next;
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Advances if the current token matches the given kind.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Expects the current token to be the given word.
    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.current.kind.is_word(word) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(word))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.current.span, self.lexer.input())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(
            expected,
            &self.current.kind,
            self.current.span,
            self.lexer.input(),
        )
    }
}
