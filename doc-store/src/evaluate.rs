use crate::{Document, compare_scalar, resolve};
use persistor_syntax::{Operand, Operator, Predicate, PredicateList, Scalar};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Collections at least this large are scanned on the rayon pool.
pub const PARALLEL_SCAN_THRESHOLD: usize = 4096;

/// True when every predicate holds for `document`.
pub fn matches(predicates: &PredicateList, document: &Document) -> bool {
    predicates
        .iter()
        .all(|predicate| predicate_matches(predicate, document))
}

/// Evaluates one predicate. Unresolvable paths and incomparable values make
/// the predicate false; evaluation itself never fails.
pub fn predicate_matches(predicate: &Predicate, document: &Document) -> bool {
    let Some(value) = resolve(document, predicate.path()) else {
        return false;
    };
    let ordering = |scalar: &Scalar| compare_scalar(value, scalar);
    // Ranges are numeric only.
    let numeric = |scalar: &Scalar| match scalar {
        Scalar::Number(_) => ordering(scalar),
        Scalar::String(_) => None,
    };
    match (predicate.operator(), predicate.operand()) {
        (Operator::Eq, Operand::Scalar(scalar)) => ordering(scalar) == Some(Ordering::Equal),
        (Operator::Gt, Operand::Scalar(scalar)) => numeric(scalar) == Some(Ordering::Greater),
        (Operator::Lt, Operand::Scalar(scalar)) => numeric(scalar) == Some(Ordering::Less),
        (Operator::In, Operand::Set(items)) => items
            .iter()
            .any(|scalar| ordering(scalar) == Some(Ordering::Equal)),
        // `Predicate::new` rules these pairings out.
        (Operator::In, Operand::Scalar(_))
        | (Operator::Eq | Operator::Gt | Operator::Lt, Operand::Set(_)) => false,
    }
}

/// Returns the documents matching `predicates`, in their original order.
pub fn query_documents<'a>(
    documents: &'a [Document],
    predicates: &PredicateList,
) -> Vec<&'a Document> {
    if documents.len() >= PARALLEL_SCAN_THRESHOLD {
        documents
            .par_iter()
            .filter(|document| matches(predicates, document))
            .collect()
    } else {
        documents
            .iter()
            .filter(|document| matches(predicates, document))
            .collect()
    }
}
