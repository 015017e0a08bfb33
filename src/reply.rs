use doc_store::{Document, FilterError};
use persistor_syntax::{ErrorKind, QueryError};
use serde_json::{Value, json};
use std::fmt;

/// Outcome of one request, mapped onto the `{status: ...}` envelope by
/// [`Reply::into_json`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Found(Vec<Document>),
    Saved(Value),
    Deleted(usize),
    Failed { kind: FailureKind, message: String },
}

impl Reply {
    pub fn is_ok(&self) -> bool {
        !matches!(self, Reply::Failed { .. })
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Reply::Failed {
            kind,
            message: message.into(),
        }
    }

    /// Matching documents of a successful find.
    pub fn results(&self) -> Option<&[Document]> {
        match self {
            Reply::Found(documents) => Some(documents),
            _ => None,
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            Reply::Found(results) => json!({ "status": "ok", "results": results }),
            Reply::Saved(id) => json!({ "status": "ok", "_id": id }),
            Reply::Deleted(number) => json!({ "status": "ok", "number": number }),
            Reply::Failed { kind, message } => json!({
                "status": "error",
                "kind": kind.as_str(),
                "message": message,
            }),
        }
    }
}

/// Which layer rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Lex,
    Parse,
    Translation,
    /// A delete matcher the store cannot interpret.
    Filter,
    /// The request envelope itself is malformed.
    Request,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Lex => "lex",
            FailureKind::Parse => "parse",
            FailureKind::Translation => "translation",
            FailureKind::Filter => "filter",
            FailureKind::Request => "request",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorKind> for FailureKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Lex => FailureKind::Lex,
            ErrorKind::Parse => FailureKind::Parse,
            ErrorKind::Translation => FailureKind::Translation,
        }
    }
}

impl From<QueryError> for Reply {
    fn from(err: QueryError) -> Self {
        Reply::failed(err.kind().into(), err.to_string())
    }
}

impl From<FilterError> for Reply {
    fn from(err: FilterError) -> Self {
        Reply::failed(FailureKind::Filter, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistor_syntax::parse_query;

    #[test]
    fn envelopes() {
        assert_eq!(
            Reply::Found(Vec::new()).into_json(),
            json!({ "status": "ok", "results": [] })
        );
        assert_eq!(
            Reply::Saved(json!("abc")).into_json(),
            json!({ "status": "ok", "_id": "abc" })
        );
        assert_eq!(
            Reply::Deleted(3).into_json(),
            json!({ "status": "ok", "number": 3 })
        );
    }

    #[test]
    fn query_errors_keep_their_kind() {
        let reply = Reply::from(parse_query(r#"name $eq "Joe"#).unwrap_err());
        assert!(!reply.is_ok());
        let json = reply.into_json();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "lex");
        assert!(json["message"].as_str().unwrap().contains("missing closing quote"));

        let reply = Reply::from(parse_query("name $ne 1").unwrap_err());
        assert!(matches!(reply, Reply::Failed { kind: FailureKind::Parse, .. }));
    }
}
