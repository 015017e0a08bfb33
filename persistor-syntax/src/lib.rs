//! # Persistor query syntax
//!
//! `persistor-syntax` turns the persistor's compact filter language into a
//! typed list of predicates. A query is a whitespace separated sequence of
//! `path operator operand` triples that are implicitly AND-ed together:
//!
//! ```text
//! _id $in { "a", "b" } name $eq "Joe" age $gt 10 person.temperature $lt 37.5
//! ```
//!
//! Supported operators are `$eq`, `$gt`, `$lt` (scalar operand) and `$in`
//! (non-empty set operand). Strings are double quoted without escapes; numbers
//! are `[+-]?digits(.digits)?`; paths are dot separated identifiers.
//!
//! ## Example
//! ```
//! use persistor_syntax::{parse_query, Operand, Operator, Scalar};
//!
//! let list = parse_query(r#"person.name $eq "Sam" person.age $lt 60"#).unwrap();
//! let first = &list.as_slice()[0];
//! assert_eq!(first.path().segments(), ["person", "name"]);
//! assert_eq!(first.operator(), Operator::Eq);
//! assert_eq!(first.operand(), &Operand::Scalar(Scalar::String("Sam".into())));
//!
//! let err = parse_query(r#"name $eq "Sam"#).unwrap_err();
//! assert_eq!(err.kind().as_str(), "lex");
//! ```

mod error;
mod lexer;
mod model;
mod parser;

pub use error::*;
pub use lexer::*;
pub use model::*;
pub use parser::*;

/// Tokenizes and parses a query string in one step.
pub fn parse_query(input: &str) -> Result<PredicateList, QueryError> {
    let tokens = tokenize(input)?;
    Ok(parse_tokens(&tokens, input.len())?)
}
