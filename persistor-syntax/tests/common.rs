#![allow(dead_code)]
//! Shared helpers for `persistor-syntax` integration tests.

use persistor_syntax::*;

pub fn parse_ok(input: &str) -> PredicateList {
    parse_query(input).unwrap()
}

pub fn parse_err(input: &str) -> QueryError {
    parse_query(input).unwrap_err()
}

pub fn only(list: &PredicateList) -> &Predicate {
    assert_eq!(list.len(), 1, "expected a single predicate, got: {list}");
    &list.as_slice()[0]
}

pub fn path_is(predicate: &Predicate, expected: &[&str]) {
    assert_eq!(predicate.path().segments(), expected);
}

pub fn scalar_of(predicate: &Predicate) -> &Scalar {
    match predicate.operand() {
        Operand::Scalar(scalar) => scalar,
        other => panic!("expected scalar operand, got: {other:?}"),
    }
}

pub fn set_of(predicate: &Predicate) -> &[Scalar] {
    match predicate.operand() {
        Operand::Set(items) => items,
        other => panic!("expected set operand, got: {other:?}"),
    }
}

pub fn string_is(scalar: &Scalar, expected: &str) {
    match scalar {
        Scalar::String(text) => assert_eq!(text, expected),
        other => panic!("expected string, got: {other:?}"),
    }
}

pub fn number_is(scalar: &Scalar, expected: f64) {
    match scalar {
        Scalar::Number(value) => assert_eq!(*value, expected),
        other => panic!("expected number, got: {other:?}"),
    }
}

pub fn assert_kind(input: &str, kind: ErrorKind) {
    let err = parse_err(input);
    assert_eq!(err.kind(), kind, "{input:?} failed with {err}");
}
