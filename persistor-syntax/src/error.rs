use std::fmt;
use thiserror::Error;

/// Raised by the tokenizer: unterminated quotes and unbalanced braces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at byte {position})")]
pub struct LexError {
    pub message: String,
    pub position: usize,
}

impl LexError {
    pub(crate) fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Raised by the parser when the token stream violates the grammar.
///
/// `position` is the byte offset of the offending token, or the input length
/// when the query ends mid-predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at byte {position})")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Raised when a predicate cannot be expressed as a backend filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot translate predicate on `{path}`: {message}")]
pub struct TranslationError {
    pub path: String,
    pub message: String,
}

impl TranslationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Every failure a query can produce on its way from text to filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("translation error: {0}")]
    Translation(#[from] TranslationError),
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::Lex(_) => ErrorKind::Lex,
            QueryError::Parse(_) => ErrorKind::Parse,
            QueryError::Translation(_) => ErrorKind::Translation,
        }
    }

    /// Byte offset into the query string, when the failure has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            QueryError::Lex(err) => Some(err.position),
            QueryError::Parse(err) => Some(err.position),
            QueryError::Translation(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Parse,
    Translation,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Lex => "lex",
            ErrorKind::Parse => "parse",
            ErrorKind::Translation => "translation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
