use std::fmt;

use rust_decimal::Decimal;

use super::value::{FieldValue, Literal, ValueKind};

/// The typed, ordered values attached to a predicate node.
///
/// Every element has the set's declared [`ValueKind`]. Order and duplicates are
/// preserved as written in the rule document.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralSet {
    kind: ValueKind,
    values: Vec<Literal>,
}

impl LiteralSet {
    /// An empty set of the given kind.
    #[must_use]
    pub fn empty(kind: ValueKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn int32(values: impl IntoIterator<Item = i32>) -> Self {
        Self::typed(ValueKind::Int32, values.into_iter().map(Literal::Int32))
    }

    #[must_use]
    pub fn int64(values: impl IntoIterator<Item = i64>) -> Self {
        Self::typed(ValueKind::Int64, values.into_iter().map(Literal::Int64))
    }

    #[must_use]
    pub fn string<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::typed(
            ValueKind::String,
            values.into_iter().map(|s| Literal::String(s.into())),
        )
    }

    #[must_use]
    pub fn decimal(values: impl IntoIterator<Item = Decimal>) -> Self {
        Self::typed(ValueKind::Decimal, values.into_iter().map(Literal::Decimal))
    }

    #[must_use]
    pub fn bool(values: impl IntoIterator<Item = bool>) -> Self {
        Self::typed(ValueKind::Bool, values.into_iter().map(Literal::Bool))
    }

    fn typed(kind: ValueKind, values: impl Iterator<Item = Literal>) -> Self {
        Self {
            kind,
            values: values.collect(),
        }
    }

    /// Append a literal. The caller guarantees it has the set's kind.
    pub(crate) fn push(&mut self, literal: Literal) {
        debug_assert_eq!(literal.kind(), self.kind);
        self.values.push(literal);
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn values(&self) -> &[Literal] {
        &self.values
    }

    #[must_use]
    pub fn first(&self) -> Option<&Literal> {
        self.values.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Membership test against a field value.
    #[must_use]
    pub fn contains(&self, value: &FieldValue<'_>) -> bool {
        self.values.iter().any(|literal| value.matches(literal))
    }
}

impl fmt::Display for LiteralSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, literal) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{literal}")?;
        }
        write!(f, "]")
    }
}

impl From<Literal> for LiteralSet {
    fn from(literal: Literal) -> Self {
        Self {
            kind: literal.kind(),
            values: vec![literal],
        }
    }
}

impl From<i32> for LiteralSet {
    fn from(v: i32) -> Self {
        Literal::from(v).into()
    }
}

impl From<i64> for LiteralSet {
    fn from(v: i64) -> Self {
        Literal::from(v).into()
    }
}

impl From<Decimal> for LiteralSet {
    fn from(v: Decimal) -> Self {
        Literal::from(v).into()
    }
}

impl From<bool> for LiteralSet {
    fn from(v: bool) -> Self {
        Literal::from(v).into()
    }
}

impl From<&str> for LiteralSet {
    fn from(v: &str) -> Self {
        Literal::from(v).into()
    }
}

impl From<String> for LiteralSet {
    fn from(v: String) -> Self {
        Literal::from(v).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_constructors_keep_order_and_duplicates() {
        let set = LiteralSet::int32([3, 1, 3]);
        assert_eq!(set.kind(), ValueKind::Int32);
        assert_eq!(
            set.values(),
            &[Literal::Int32(3), Literal::Int32(1), Literal::Int32(3)]
        );
    }

    #[test]
    fn single_value_conversion() {
        let set = LiteralSet::from("John");
        assert_eq!(set.kind(), ValueKind::String);
        assert_eq!(set.first(), Some(&Literal::String("John".into())));
    }

    #[test]
    fn contains_checks_kind_and_value() {
        let set = LiteralSet::int32([123_456, 432_156]);
        assert!(set.contains(&FieldValue::Int32(123_456)));
        assert!(!set.contains(&FieldValue::Int32(654_321)));
        assert!(!set.contains(&FieldValue::Int64(123_456)));
    }

    #[test]
    fn empty_set_contains_nothing() {
        let set = LiteralSet::empty(ValueKind::String);
        assert!(set.is_empty());
        assert!(!set.contains(&FieldValue::String("")));
    }

    #[test]
    fn display() {
        assert_eq!(LiteralSet::int64([1, 2]).to_string(), "[1, 2]");
        assert_eq!(LiteralSet::string(["a"]).to_string(), "[\"a\"]");
        assert_eq!(LiteralSet::empty(ValueKind::Bool).to_string(), "[]");
    }
}
