//! Document side of the persistor query core.
//!
//! A parsed [`PredicateList`](persistor_syntax::PredicateList) can take two
//! routes from here: [`translate`] turns it into the filter document a real
//! store consumes, while [`matches`] and [`query`] answer it directly against
//! in-memory documents. [`filter_matches`] interprets translated filters the
//! way the store would, so both routes can be checked against each other.

mod collection;
mod document;
mod evaluate;
mod filter;
mod translate;

pub use collection::*;
pub use document::*;
pub use evaluate::*;
pub use filter::*;
pub use translate::*;
