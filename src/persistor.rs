use crate::{FailureKind, FakeDatabase, PersistorConfig, Reply, Request};
use anyhow::{Result, bail};
use doc_store::{Document, translate};
use persistor_syntax::{QueryError, parse_query};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Answers persistor requests against the in-memory fake database.
///
/// ```
/// use mongo_persistor::{Persistor, PersistorConfig, Request};
/// use serde_json::json;
///
/// let persistor = Persistor::new(PersistorConfig::fake()).unwrap();
/// persistor.handle_json(&json!({
///     "action": "save",
///     "collection": "people",
///     "document": { "name": "Joe", "age": 20 }
/// }));
/// let reply = persistor.handle(Request::find("people", "age $gt 10"));
/// assert_eq!(reply.results().unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct Persistor {
    config: PersistorConfig,
    database: FakeDatabase,
}

impl Persistor {
    pub fn new(config: PersistorConfig) -> Result<Self> {
        if !config.fake {
            bail!(
                "persistor at {} targets a live store at {}:{}, only fake mode is available",
                config.address,
                config.host,
                config.port
            );
        }
        info!(address = %config.address, db_name = %config.db_name, "persistor started in fake mode");
        Ok(Self {
            config,
            database: FakeDatabase::new(),
        })
    }

    pub fn config(&self) -> &PersistorConfig {
        &self.config
    }

    pub fn database(&self) -> &FakeDatabase {
        &self.database
    }

    pub fn handle(&self, request: Request) -> Reply {
        debug!(action = request.action(), collection = request.collection(), "handling request");
        let reply = match request {
            Request::Save {
                collection,
                document,
            } => Reply::Saved(self.database.save(&collection, document)),
            Request::Delete {
                collection,
                matcher,
            } => match self.database.delete(&collection, &matcher) {
                Ok(number) => Reply::Deleted(number),
                Err(err) => err.into(),
            },
            Request::Find {
                collection,
                matcher,
            } => match self.find(&collection, &matcher.query) {
                Ok(results) => Reply::Found(results),
                Err(err) => err.into(),
            },
        };
        if let Reply::Failed { kind, message } = &reply {
            warn!(%kind, %message, "request failed");
        }
        reply
    }

    /// Decodes a wire request and encodes the reply envelope.
    pub fn handle_json(&self, request: &Value) -> Value {
        match Request::deserialize(request) {
            Ok(request) => self.handle(request).into_json(),
            Err(err) => Reply::failed(FailureKind::Request, err.to_string()).into_json(),
        }
    }

    /// Runs a query string against `collection`.
    ///
    /// The translated filter is what a live store would receive; in fake mode
    /// it is logged and the predicates are evaluated directly.
    pub fn find(&self, collection: &str, query: &str) -> Result<Vec<Document>, QueryError> {
        let predicates = parse_query(query)?;
        let filter = translate(&predicates)?;
        debug!(collection, %filter, "translated query");
        let results = self.database.find(collection, &predicates);
        debug!(collection, matched = results.len(), "query evaluated");
        Ok(results)
    }
}
