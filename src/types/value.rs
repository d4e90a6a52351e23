use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;

/// The primitive kinds a field or literal can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A 32-bit signed integer.
    Int32,
    /// A 64-bit signed integer.
    Int64,
    /// A UTF-8 string.
    String,
    /// A fixed-point decimal.
    Decimal,
    /// A boolean value.
    Bool,
}

impl ValueKind {
    /// Look up a kind by its declared name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            ValueKind::Int32,
            ValueKind::Int64,
            ValueKind::String,
            ValueKind::Decimal,
            ValueKind::Bool,
        ]
        .into_iter()
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Int32 => "Int32",
            ValueKind::Int64 => "Int64",
            ValueKind::String => "String",
            ValueKind::Decimal => "Decimal",
            ValueKind::Bool => "Bool",
        }
    }

    /// Whether values of this kind have a natural ordering usable by `GreaterThan`.
    #[must_use]
    pub fn is_ordered(self) -> bool {
        matches!(self, ValueKind::Int32 | ValueKind::Int64 | ValueKind::Decimal)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value read out of a record field. Strings borrow from the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Int32(i32),
    Int64(i64),
    String(&'a str),
    Decimal(Decimal),
    Bool(bool),
}

/// An owned, typed literal taken from a rule document.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int32(i32),
    Int64(i64),
    String(String),
    Decimal(Decimal),
    Bool(bool),
}

impl FieldValue<'_> {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Int32(_) => ValueKind::Int32,
            FieldValue::Int64(_) => ValueKind::Int64,
            FieldValue::String(_) => ValueKind::String,
            FieldValue::Decimal(_) => ValueKind::Decimal,
            FieldValue::Bool(_) => ValueKind::Bool,
        }
    }

    /// Compare this field value to a literal.
    /// Returns `None` when the kinds differ.
    #[must_use]
    pub fn compare(&self, literal: &Literal) -> Option<Ordering> {
        match (self, literal) {
            (FieldValue::Int32(a), Literal::Int32(b)) => Some(a.cmp(b)),
            (FieldValue::Int64(a), Literal::Int64(b)) => Some(a.cmp(b)),
            (FieldValue::String(a), Literal::String(b)) => Some((*a).cmp(b.as_str())),
            (FieldValue::Decimal(a), Literal::Decimal(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), Literal::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Whether this value equals the literal. Values of different kinds are never equal.
    #[must_use]
    pub fn matches(&self, literal: &Literal) -> bool {
        self.compare(literal) == Some(Ordering::Equal)
    }

    /// String prefix test. Non-string values never match.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        match self {
            FieldValue::String(s) => s.starts_with(prefix),
            _ => false,
        }
    }
}

impl Literal {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Literal::Int32(_) => ValueKind::Int32,
            Literal::Int64(_) => ValueKind::Int64,
            Literal::String(_) => ValueKind::String,
            Literal::Decimal(_) => ValueKind::Decimal,
            Literal::Bool(_) => ValueKind::Bool,
        }
    }

    /// The literal as plain text, without quoting.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Literal::String(s) => s.clone(),
            Literal::Int32(v) => v.to_string(),
            Literal::Int64(v) => v.to_string(),
            Literal::Decimal(v) => v.to_string(),
            Literal::Bool(v) => v.to_string(),
        }
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int32(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int64(v)
    }
}

impl From<Decimal> for Literal {
    fn from(v: Decimal) -> Self {
        Literal::Decimal(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::String(v.to_owned())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::String(v)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(v) => write!(f, "\"{v}\""),
            other => f.write_str(&other.to_text()),
        }
    }
}
