use crate::LexError;
use std::fmt;

/// A single lexical unit of a query, tagged with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Unquoted text that is neither a number nor an operator (`person.age`).
    FieldPath(String),
    /// Unquoted text starting with `$`. Unknown operators are left for the
    /// parser to reject so the error can name the predicate.
    Operator(String),
    /// Double quoted text, taken verbatim.
    String(String),
    Number(f64),
    SetOpen,
    SetClose,
    Comma,
}

impl TokenKind {
    /// Short human description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::FieldPath(text) => format!("field path `{text}`"),
            TokenKind::Operator(text) => format!("operator `{text}`"),
            TokenKind::String(text) => format!("string \"{text}\""),
            TokenKind::Number(value) => format!("number {value}"),
            TokenKind::SetOpen => "'{'".to_string(),
            TokenKind::SetClose => "'}'".to_string(),
            TokenKind::Comma => "','".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Splits a raw query into tokens.
///
/// ```
/// use persistor_syntax::{tokenize, TokenKind};
///
/// let tokens = tokenize(r#"_id $in { "a", "b" }"#).unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds[0], TokenKind::FieldPath("_id".into()));
/// assert_eq!(kinds[1], TokenKind::Operator("$in".into()));
/// assert_eq!(kinds[2], TokenKind::SetOpen);
/// assert_eq!(kinds.len(), 7);
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).run()
}

// Quotes are consumed in one go by `quoted`, so only the brace state has to
// survive between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    InsideSet { opened_at: usize },
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    mode: Mode,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::Normal,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_ws();
            let Some(ch) = self.peek_char() else {
                break;
            };
            let position = self.pos;
            let kind = match ch {
                '"' => TokenKind::String(self.quoted()?),
                '{' => {
                    if let Mode::InsideSet { .. } = self.mode {
                        return Err(LexError::new("nested '{' inside a set", position));
                    }
                    self.advance_char();
                    self.mode = Mode::InsideSet {
                        opened_at: position,
                    };
                    TokenKind::SetOpen
                }
                '}' => {
                    if self.mode == Mode::Normal {
                        return Err(LexError::new("unmatched '}'", position));
                    }
                    self.advance_char();
                    self.mode = Mode::Normal;
                    TokenKind::SetClose
                }
                ',' => {
                    self.advance_char();
                    TokenKind::Comma
                }
                _ => self.bare()?,
            };
            tokens.push(Token { kind, position });
        }

        if let Mode::InsideSet { opened_at } = self.mode {
            return Err(LexError::new("unmatched '{'", opened_at));
        }
        Ok(tokens)
    }

    // No escape sequences: everything up to the next quote is literal text.
    fn quoted(&mut self) -> Result<String, LexError> {
        let quote_pos = self.pos;
        self.advance_char();
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch == '"' {
                let text = self.input[start..self.pos].to_string();
                self.advance_char();
                return Ok(text);
            }
            self.advance_char();
        }
        Err(LexError::new("missing closing quote", quote_pos))
    }

    fn bare(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if is_token_breaker(ch) {
                break;
            }
            self.advance_char();
        }
        let text = &self.input[start..self.pos];
        Ok(if text.starts_with('$') {
            TokenKind::Operator(text.to_string())
        } else if let Some(value) = parse_number(text) {
            // Overflowing digit strings would reach the filter as `inf`.
            if !value.is_finite() {
                return Err(LexError::new("number out of range", start));
            }
            TokenKind::Number(value)
        } else {
            TokenKind::FieldPath(text.to_string())
        })
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }
}

fn is_token_breaker(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '"' | '{' | '}' | ',')
}

/// Accepts `[+-]?digits(.digits)?` and nothing else, so `1e5`, `.5` and `5.`
/// stay field path candidates.
fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }
    text.parse().ok()
}
