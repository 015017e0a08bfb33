use crate::{Document, query_documents};
use persistor_syntax::PredicateList;
use serde::{Deserialize, Serialize};

/// Named, ordered set of documents used when no live backend is available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FakeCollection {
    pub name: String,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl FakeCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub fn with_documents(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            documents,
        }
    }

    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Documents of `collection` matching every predicate, in collection order.
pub fn query<'a>(collection: &'a FakeCollection, predicates: &PredicateList) -> Vec<&'a Document> {
    query_documents(&collection.documents, predicates)
}
