#[cfg(test)]
mod tests;

use doc_store::{Document, FilterError, filter_matches, query_documents, validate_filter};
use parking_lot::RwLock;
use persistor_syntax::PredicateList;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

/// An immutable view of one collection at a point in time.
pub type Snapshot = Arc<[Document]>;

/// In-memory stand-in for the document store.
///
/// Every collection is held as a copy-on-write snapshot: writers build a new
/// slice and swap it in under the write lock, readers clone the `Arc` under
/// the read lock and scan without holding it. A scan therefore never sees a
/// half-applied write.
#[derive(Debug, Default)]
pub struct FakeDatabase {
    collections: RwLock<HashMap<String, Snapshot>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of `collection`; empty when it was never written.
    pub fn snapshot(&self, collection: &str) -> Snapshot {
        self.collections
            .read()
            .get(collection)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Inserts `document`, or replaces the stored document with the same
    /// `_id`. A fresh UUID string is assigned when `_id` is missing.
    ///
    /// Returns the document's `_id`.
    pub fn save(&self, collection: &str, mut document: Document) -> Value {
        let id = document
            .entry("_id")
            .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()))
            .clone();

        let mut collections = self.collections.write();
        let current = collections.get(collection).map_or(&[][..], |docs| &docs[..]);
        let mut next = current.to_vec();
        match next.iter_mut().find(|stored| stored.get("_id") == Some(&id)) {
            Some(stored) => {
                debug!(collection, %id, "replacing document");
                *stored = document;
            }
            None => next.push(document),
        }
        collections.insert(collection.to_string(), Arc::from(next));
        id
    }

    /// Removes every document matching `matcher` (a native filter document;
    /// `{}` empties the collection). Returns how many were removed.
    pub fn delete(&self, collection: &str, matcher: &Value) -> Result<usize, FilterError> {
        validate_filter(matcher)?;
        let mut collections = self.collections.write();
        let Some(current) = collections.get(collection) else {
            return Ok(0);
        };
        let mut kept = Vec::with_capacity(current.len());
        for document in current.iter() {
            if !filter_matches(matcher, document)? {
                kept.push(document.clone());
            }
        }
        let removed = current.len() - kept.len();
        collections.insert(collection.to_string(), Arc::from(kept));
        info!(collection, removed, "deleted documents");
        Ok(removed)
    }

    /// Documents matching a native filter document, in insertion order.
    pub fn find_by_filter(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Vec<Document>, FilterError> {
        validate_filter(filter)?;
        let snapshot = self.snapshot(collection);
        let mut found = Vec::new();
        for document in snapshot.iter() {
            if filter_matches(filter, document)? {
                found.push(document.clone());
            }
        }
        Ok(found)
    }

    /// Documents matching a parsed predicate list, in insertion order.
    pub fn find(&self, collection: &str, predicates: &PredicateList) -> Vec<Document> {
        let snapshot = self.snapshot(collection);
        query_documents(&snapshot, predicates)
            .into_iter()
            .cloned()
            .collect()
    }
}
