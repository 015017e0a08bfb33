use std::fmt;

/// Dotted address of a possibly nested document field (`person.age`).
///
/// Segments are never empty and never contain `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Splits `text` on `.`; returns `None` when any segment would be empty.
    ///
    /// ```
    /// use persistor_syntax::FieldPath;
    /// let path = FieldPath::parse("person.age").unwrap();
    /// assert_eq!(path.segments(), ["person", "age"]);
    /// assert!(FieldPath::parse("person..age").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let segments: Vec<String> = text.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The backend's native dotted form.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `$eq`
    Eq,
    /// `$gt`, strictly greater.
    Gt,
    /// `$lt`, strictly less.
    Lt,
    /// `$in`, set membership.
    In,
}

impl Operator {
    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "$eq" => Some(Operator::Eq),
            "$gt" => Some(Operator::Gt),
            "$lt" => Some(Operator::Lt),
            "$in" => Some(Operator::In),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Gt => "$gt",
            Operator::Lt => "$lt",
            Operator::In => "$in",
        }
    }

    /// Whether this operator takes a `{ ... }` set rather than a scalar.
    pub fn takes_set(self) -> bool {
        matches!(self, Operator::In)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(text) => write!(f, "\"{text}\""),
            Scalar::Number(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(Scalar),
    /// Elements keep the order they were written in.
    Set(Vec<Scalar>),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Scalar(scalar) => write!(f, "{scalar}"),
            Operand::Set(items) => {
                f.write_str("{ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

/// One `path operator operand` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    path: FieldPath,
    operator: Operator,
    operand: Operand,
}

impl Predicate {
    /// Returns `None` when the operand does not fit the operator: `$in` needs
    /// a non-empty set, everything else a scalar.
    pub fn new(path: FieldPath, operator: Operator, operand: Operand) -> Option<Self> {
        let fits = match &operand {
            Operand::Set(items) => operator.takes_set() && !items.is_empty(),
            Operand::Scalar(_) => !operator.takes_set(),
        };
        fits.then_some(Self {
            path,
            operator,
            operand,
        })
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.path, self.operator, self.operand)
    }
}

/// Implicit conjunction of predicates, in the order they were written.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateList {
    predicates: Vec<Predicate>,
}

impl PredicateList {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }

    pub fn as_slice(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<'a> IntoIterator for &'a PredicateList {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}

/// Re-serializes into query syntax that parses back to an equal list.
impl fmt::Display for PredicateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(text: &str) -> FieldPath {
        FieldPath::parse(text).unwrap()
    }

    #[test]
    fn field_path_rejects_empty_segments() {
        for text in ["", ".", ".a", "a.", "a..b"] {
            assert!(FieldPath::parse(text).is_none(), "{text:?}");
        }
        assert_eq!(path("_id").segments(), ["_id"]);
        assert_eq!(path("a.b.c").dotted(), "a.b.c");
    }

    #[test]
    fn predicate_enforces_operand_kind() {
        let set = Operand::Set(vec![Scalar::String("a".into())]);
        let scalar = Operand::Scalar(Scalar::Number(1.0));

        assert!(Predicate::new(path("x"), Operator::In, set.clone()).is_some());
        assert!(Predicate::new(path("x"), Operator::In, scalar.clone()).is_none());
        assert!(Predicate::new(path("x"), Operator::Eq, set).is_none());
        assert!(Predicate::new(path("x"), Operator::Lt, scalar).is_some());
        assert!(Predicate::new(path("x"), Operator::In, Operand::Set(Vec::new())).is_none());
    }

    #[test]
    fn displays_in_query_syntax() {
        let list = PredicateList::new(vec![
            Predicate::new(
                path("_id"),
                Operator::In,
                Operand::Set(vec![Scalar::String("a".into()), Scalar::Number(2.0)]),
            )
            .unwrap(),
            Predicate::new(
                path("person.temperature"),
                Operator::Gt,
                Operand::Scalar(Scalar::Number(-36.5)),
            )
            .unwrap(),
        ]);
        assert_eq!(
            list.to_string(),
            r#"_id $in { "a", 2 } person.temperature $gt -36.5"#
        );
    }
}
