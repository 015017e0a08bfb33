use doc_store::Document;
use serde::Deserialize;
use serde_json::Value;

/// A decoded persistor request, tagged by its `action` field.
///
/// ```
/// use mongo_persistor::Request;
/// use serde_json::json;
///
/// let request: Request = serde_json::from_value(json!({
///     "action": "find",
///     "collection": "testcoll2",
///     "matcher": { "query": "age $gt 10" }
/// }))
/// .unwrap();
/// assert_eq!(request.collection(), "testcoll2");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    Save {
        collection: String,
        document: Document,
    },
    Delete {
        collection: String,
        /// Native filter document; `{}` deletes everything.
        #[serde(default = "empty_matcher")]
        matcher: Value,
    },
    Find {
        collection: String,
        matcher: QueryMatcher,
    },
}

impl Request {
    pub fn collection(&self) -> &str {
        match self {
            Request::Save { collection, .. }
            | Request::Delete { collection, .. }
            | Request::Find { collection, .. } => collection,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Request::Save { .. } => "save",
            Request::Delete { .. } => "delete",
            Request::Find { .. } => "find",
        }
    }

    pub fn find(collection: impl Into<String>, query: impl Into<String>) -> Self {
        Request::Find {
            collection: collection.into(),
            matcher: QueryMatcher {
                query: query.into(),
            },
        }
    }
}

/// The `matcher` of a find request: a query string in the persistor's filter
/// language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryMatcher {
    pub query: String,
}

fn empty_matcher() -> Value {
    Value::Object(Default::default())
}
