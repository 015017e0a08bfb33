use persistor_syntax::{Operand, Predicate, PredicateList, Scalar, TranslationError};
use serde_json::{Map, Number, Value, json};
use tracing::debug;

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Translates a predicate list into the backend's native filter document.
///
/// Each predicate becomes its own clause under `$and`, so two bounds on the
/// same path are both kept instead of one overwriting the other.
///
/// ```
/// use doc_store::translate;
/// use persistor_syntax::parse_query;
/// use serde_json::json;
///
/// let predicates = parse_query(r#"person.age $gt 10 person.age $lt 60"#).unwrap();
/// assert_eq!(
///     translate(&predicates).unwrap(),
///     json!({ "$and": [
///         { "person.age": { "$gt": 10 } },
///         { "person.age": { "$lt": 60 } }
///     ]})
/// );
/// ```
pub fn translate(predicates: &PredicateList) -> Result<Value, TranslationError> {
    let clauses = predicates
        .iter()
        .map(translate_predicate)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(clauses = clauses.len(), "translated predicate list");
    Ok(json!({ "$and": clauses }))
}

/// `{"<dotted.path>": {"<operator>": <operand>}}` for a single predicate.
pub fn translate_predicate(predicate: &Predicate) -> Result<Value, TranslationError> {
    let path = predicate.path().dotted();
    let operand = match predicate.operand() {
        Operand::Scalar(scalar) => scalar_to_json(&path, scalar)?,
        Operand::Set(items) => Value::Array(
            items
                .iter()
                .map(|scalar| scalar_to_json(&path, scalar))
                .collect::<Result<_, _>>()?,
        ),
    };

    let mut condition = Map::new();
    condition.insert(predicate.operator().as_str().to_string(), operand);
    let mut clause = Map::new();
    clause.insert(path, Value::Object(condition));
    Ok(Value::Object(clause))
}

/// Whole numbers become JSON integers so they match integer typed fields the
/// way the backend stores them; everything else stays a double.
fn scalar_to_json(path: &str, scalar: &Scalar) -> Result<Value, TranslationError> {
    match scalar {
        Scalar::String(text) => Ok(Value::String(text.clone())),
        Scalar::Number(value) if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER => {
            Ok(Value::from(*value as i64))
        }
        Scalar::Number(value) => Number::from_f64(*value)
            .map(Value::Number)
            .ok_or_else(|| TranslationError::new(path, format!("{value} is not a finite number"))),
    }
}
