//! Fake-mode persistor: answers `save`, `delete` and `find` requests against
//! in-memory collections, using the query core from `persistor-syntax` and
//! `doc-store`.
mod config;
mod database;
mod dispatch;
mod persistor;
mod reply;
mod request;

pub use config::PersistorConfig;
pub use database::{FakeDatabase, Snapshot};
pub use dispatch::Dispatcher;
pub use persistor::Persistor;
pub use reply::{FailureKind, Reply};
pub use request::{QueryMatcher, Request};
