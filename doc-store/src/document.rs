use persistor_syntax::{FieldPath, Scalar};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A stored document: field name to JSON value, nested objects allowed.
pub type Document = Map<String, Value>;

/// Walks `path` one segment at a time through nested objects.
///
/// Returns `None` when a segment is missing or an intermediate value is not
/// an object. Arrays are not traversed.
pub fn resolve<'a>(document: &'a Document, path: &FieldPath) -> Option<&'a Value> {
    resolve_segments(document, path.segments().iter().map(String::as_str))
}

/// Same walk as [`resolve`] for a backend style dotted key (`person.age`).
pub fn resolve_dotted<'a>(document: &'a Document, key: &str) -> Option<&'a Value> {
    resolve_segments(document, key.split('.'))
}

fn resolve_segments<'a, 'k>(
    document: &'a Document,
    mut segments: impl Iterator<Item = &'k str>,
) -> Option<&'a Value> {
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Orders a stored value against a query scalar.
///
/// Numbers compare numerically and strings lexicographically; any other
/// pairing is incomparable, so a string never equals a number.
pub fn compare_scalar(value: &Value, scalar: &Scalar) -> Option<Ordering> {
    match (value, scalar) {
        (Value::Number(number), Scalar::Number(expected)) => {
            number.as_f64()?.partial_cmp(expected)
        }
        (Value::String(text), Scalar::String(expected)) => Some(text.as_str().cmp(expected)),
        _ => None,
    }
}

/// [`compare_scalar`] for two JSON values, as the filter matcher sees them.
pub fn compare_values(value: &Value, expected: &Value) -> Option<Ordering> {
    match (value, expected) {
        (Value::Number(left), Value::Number(right)) => left.as_f64()?.partial_cmp(&right.as_f64()?),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

/// Type-aware equality. Scalars go through [`compare_values`]; booleans,
/// nulls, arrays and objects fall back to structural equality.
pub fn values_equal(value: &Value, expected: &Value) -> bool {
    match (value, expected) {
        (Value::Number(_), Value::Number(_)) | (Value::String(_), Value::String(_)) => {
            compare_values(value, expected) == Some(Ordering::Equal)
        }
        (Value::Number(_) | Value::String(_), _) | (_, Value::Number(_) | Value::String(_)) => {
            false
        }
        _ => value == expected,
    }
}
