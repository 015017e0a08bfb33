//! Interprets native filter documents against in-memory documents, standing
//! in for the real store when the persistor runs in fake mode.
//!
//! Accepted shapes:
//! - `{}` matches everything;
//! - `{"$and": [filter, ...]}`;
//! - `{"path": {"$eq" | "$gt" | "$lt": value, "$in": [values]}}`;
//! - `{"path": value}` as shorthand for `$eq`.
//!
//! Keys of one object are AND-ed together.

use crate::{Document, compare_values, resolve_dotted, values_equal};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("filter must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("unsupported filter operator `{0}`")]
    UnknownOperator(String),
    #[error("`{operator}` expects {expected}")]
    InvalidOperand {
        operator: String,
        expected: &'static str,
    },
}

pub fn filter_matches(filter: &Value, document: &Document) -> Result<bool, FilterError> {
    let Value::Object(clauses) = filter else {
        return Err(FilterError::NotAnObject(type_name(filter)));
    };
    clauses_match(clauses, document)
}

/// Rejects filters this matcher cannot interpret, without a document.
pub fn validate_filter(filter: &Value) -> Result<(), FilterError> {
    filter_matches(filter, &Document::new()).map(|_| ())
}

// No short-circuit: a malformed clause must fail even after an earlier miss.
fn clauses_match(clauses: &Map<String, Value>, document: &Document) -> Result<bool, FilterError> {
    let mut all = true;
    for (key, condition) in clauses {
        let matched = if key == "$and" {
            let Value::Array(filters) = condition else {
                return Err(FilterError::InvalidOperand {
                    operator: key.clone(),
                    expected: "an array of filters",
                });
            };
            let mut every = true;
            for filter in filters {
                every &= filter_matches(filter, document)?;
            }
            every
        } else if key.starts_with('$') {
            return Err(FilterError::UnknownOperator(key.clone()));
        } else {
            field_matches(resolve_dotted(document, key), condition)?
        };
        all &= matched;
    }
    Ok(all)
}

fn field_matches(value: Option<&Value>, condition: &Value) -> Result<bool, FilterError> {
    match condition {
        Value::Object(operators) if is_operator_object(operators) => {
            let mut all = true;
            for (operator, operand) in operators {
                all &= operator_matches(value, operator, operand)?;
            }
            Ok(all)
        }
        expected => Ok(value.is_some_and(|value| values_equal(value, expected))),
    }
}

fn operator_matches(
    value: Option<&Value>,
    operator: &str,
    operand: &Value,
) -> Result<bool, FilterError> {
    let ordering = |expected: &Value| value.and_then(|value| compare_values(value, expected));
    match operator {
        "$eq" => Ok(value.is_some_and(|value| values_equal(value, operand))),
        "$gt" => Ok(ordering(operand) == Some(Ordering::Greater)),
        "$lt" => Ok(ordering(operand) == Some(Ordering::Less)),
        "$in" => {
            let Value::Array(candidates) = operand else {
                return Err(FilterError::InvalidOperand {
                    operator: operator.to_string(),
                    expected: "an array",
                });
            };
            Ok(value.is_some_and(|value| {
                candidates
                    .iter()
                    .any(|candidate| values_equal(value, candidate))
            }))
        }
        other => Err(FilterError::UnknownOperator(other.to_string())),
    }
}

fn is_operator_object(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.keys().all(|key| key.starts_with('$'))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
