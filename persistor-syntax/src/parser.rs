use crate::{
    FieldPath, Operand, Operator, ParseError, Predicate, PredicateList, Scalar, Token, TokenKind,
};

/// Builds a predicate list from an already tokenized query.
///
/// `input_len` is used as the error position when the stream ends
/// mid-predicate. Either every predicate parses or nothing is returned.
pub fn parse_tokens(tokens: &[Token], input_len: usize) -> Result<PredicateList, ParseError> {
    Parser::new(tokens, input_len).parse()
}

/// Recursive descent over a flat token slice. The grammar is LL(1): every
/// decision is made from the next token alone.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    input_len: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], input_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            input_len,
        }
    }

    fn parse(mut self) -> Result<PredicateList, ParseError> {
        let mut predicates = Vec::new();
        while !self.eof() {
            predicates.push(self.parse_predicate()?);
        }
        if predicates.is_empty() {
            return Err(ParseError::new("query contains no predicates", 0));
        }
        Ok(PredicateList::new(predicates))
    }

    fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        let path = self.parse_field_path()?;
        let operator = self.parse_operator()?;
        let operand_pos = self.current_position();
        let operand = self.parse_operand()?;

        let expected = if operator.takes_set() { "a set" } else { "a scalar" };
        Predicate::new(path, operator, operand).ok_or_else(|| {
            ParseError::new(format!("`{operator}` requires {expected} operand"), operand_pos)
        })
    }

    fn parse_field_path(&mut self) -> Result<FieldPath, ParseError> {
        let token = self.next_or_eof("field path")?;
        match &token.kind {
            TokenKind::FieldPath(text) => FieldPath::parse(text).ok_or_else(|| {
                ParseError::new(
                    format!("field path `{text}` has an empty segment"),
                    token.position,
                )
            }),
            other => Err(ParseError::new(
                format!("expected field path, found {other}"),
                token.position,
            )),
        }
    }

    fn parse_operator(&mut self) -> Result<Operator, ParseError> {
        let token = self.next_or_eof("operator")?;
        match &token.kind {
            TokenKind::Operator(text) => Operator::from_token(text).ok_or_else(|| {
                ParseError::new(format!("unknown operator `{text}`"), token.position)
            }),
            other => Err(ParseError::new(
                format!("expected operator, found {other}"),
                token.position,
            )),
        }
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        let token = self.next_or_eof("operand")?;
        match &token.kind {
            TokenKind::String(text) => Ok(Operand::Scalar(Scalar::String(text.clone()))),
            TokenKind::Number(value) => Ok(Operand::Scalar(Scalar::Number(*value))),
            TokenKind::SetOpen => self.parse_set_body(token.position).map(Operand::Set),
            other => Err(ParseError::new(
                format!("expected string, number or set, found {other}"),
                token.position,
            )),
        }
    }

    // Called after `{` has been consumed.
    fn parse_set_body(&mut self, open_pos: usize) -> Result<Vec<Scalar>, ParseError> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::SetClose {
                return Err(ParseError::new("set must not be empty", open_pos));
            }
        }

        let mut items = vec![self.parse_set_item()?];
        loop {
            let Some(token) = self.next() else {
                return Err(ParseError::new("missing closing '}'", self.input_len));
            };
            match token.kind {
                TokenKind::SetClose => return Ok(items),
                TokenKind::Comma => {
                    if let Some(next) = self.peek() {
                        if next.kind == TokenKind::SetClose {
                            return Err(ParseError::new("trailing ',' in set", token.position));
                        }
                    }
                    items.push(self.parse_set_item()?);
                }
                ref other => {
                    return Err(ParseError::new(
                        format!("expected ',' or '}}', found {other}"),
                        token.position,
                    ));
                }
            }
        }
    }

    fn parse_set_item(&mut self) -> Result<Scalar, ParseError> {
        let token = self.next_or_eof("set element")?;
        match &token.kind {
            TokenKind::String(text) => Ok(Scalar::String(text.clone())),
            TokenKind::Number(value) => Ok(Scalar::Number(*value)),
            other => Err(ParseError::new(
                format!("expected string or number in set, found {other}"),
                token.position,
            )),
        }
    }

    fn next_or_eof(&mut self, expected: &str) -> Result<&'a Token, ParseError> {
        self.next().ok_or_else(|| {
            ParseError::new(
                format!("unexpected end of query, expected {expected}"),
                self.input_len,
            )
        })
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn current_position(&self) -> usize {
        self.peek().map_or(self.input_len, |token| token.position)
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
