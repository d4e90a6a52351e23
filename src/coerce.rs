use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value as Json;

use crate::{CompileError, Literal, LiteralSet, ValueKind};

/// Convert a declared kind name and a JSON array of raw values into a [`LiteralSet`].
///
/// Parsing is strict per kind: integers must be JSON integers within range,
/// decimals JSON numbers, booleans JSON booleans and strings JSON strings.
pub(crate) fn coerce(declared: &str, raw: &[Json]) -> Result<LiteralSet, CompileError> {
    let kind = ValueKind::from_name(declared).ok_or_else(|| CompileError::UnsupportedValueType {
        name: declared.to_owned(),
    })?;

    let mut set = LiteralSet::empty(kind);
    for (index, element) in raw.iter().enumerate() {
        let literal = coerce_one(kind, element).ok_or_else(|| CompileError::ValueCoercion {
            index,
            kind,
            found: element.to_string(),
        })?;
        set.push(literal);
    }
    Ok(set)
}

fn coerce_one(kind: ValueKind, element: &Json) -> Option<Literal> {
    match kind {
        ValueKind::Int32 => element
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Literal::Int32),
        ValueKind::Int64 => element.as_i64().map(Literal::Int64),
        ValueKind::String => element.as_str().map(|s| Literal::String(s.to_owned())),
        ValueKind::Decimal => match element {
            Json::Number(n) => parse_decimal(&n.to_string()).map(Literal::Decimal),
            _ => None,
        },
        ValueKind::Bool => element.as_bool().map(Literal::Bool),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn values(doc: Json) -> Vec<Json> {
        doc.as_array().cloned().unwrap()
    }

    #[test]
    fn int32_values() {
        let set = coerce("Int32", &values(json!([123456, 432156]))).unwrap();
        assert_eq!(set, LiteralSet::int32([123_456, 432_156]));
    }

    #[test]
    fn int32_out_of_range() {
        let err = coerce("Int32", &values(json!([1, 3_000_000_000_i64]))).unwrap_err();
        assert!(matches!(
            err,
            CompileError::ValueCoercion { index: 1, kind: ValueKind::Int32, .. }
        ));
    }

    #[test]
    fn int32_rejects_non_numeric() {
        for raw in [json!(["123"]), json!([true]), json!([1.5]), json!([null])] {
            let err = coerce("Int32", &values(raw)).unwrap_err();
            assert!(matches!(err, CompileError::ValueCoercion { index: 0, .. }));
        }
    }

    #[test]
    fn int64_values() {
        let set = coerce("Int64", &values(json!([9_000_000_000_i64, -1]))).unwrap();
        assert_eq!(set, LiteralSet::int64([9_000_000_000, -1]));
    }

    #[test]
    fn string_values() {
        let set = coerce("String", &values(json!(["Description", ""]))).unwrap();
        assert_eq!(set, LiteralSet::string(["Description", ""]));
    }

    #[test]
    fn string_rejects_numbers() {
        let err = coerce("String", &values(json!(["ok", 5]))).unwrap_err();
        assert!(matches!(
            err,
            CompileError::ValueCoercion { index: 1, kind: ValueKind::String, .. }
        ));
    }

    #[test]
    fn decimal_values() {
        let set = coerce("Decimal", &values(json!([10.25, 3, 1e2]))).unwrap();
        assert_eq!(
            set,
            LiteralSet::decimal([Decimal::new(1025, 2), Decimal::from(3), Decimal::from(100)])
        );
    }

    #[test]
    fn decimal_keeps_source_digits() {
        let raw: Json = serde_json::from_str("[1.0000000000000001, 12345678901234567.89]").unwrap();
        let set = coerce("Decimal", &values(raw)).unwrap();
        assert_eq!(
            set,
            LiteralSet::decimal([
                Decimal::from_str("1.0000000000000001").unwrap(),
                Decimal::from_str("12345678901234567.89").unwrap(),
            ])
        );
        assert_eq!(set.to_string(), "[1.0000000000000001, 12345678901234567.89]");
    }

    #[test]
    fn decimal_scientific_notation() {
        let raw: Json = serde_json::from_str("[2.5e3, 1e-2]").unwrap();
        let set = coerce("Decimal", &values(raw)).unwrap();
        assert_eq!(set, LiteralSet::decimal([Decimal::new(2500, 0), Decimal::new(1, 2)]));
    }

    #[test]
    fn decimal_rejects_strings() {
        let err = coerce("Decimal", &values(json!(["10.25"]))).unwrap_err();
        assert!(matches!(err, CompileError::ValueCoercion { .. }));
    }

    #[test]
    fn bool_values() {
        let set = coerce("bool", &values(json!([true, false]))).unwrap();
        assert_eq!(set, LiteralSet::bool([true, false]));
    }

    #[test]
    fn unsupported_kind() {
        let err = coerce("Double", &values(json!([1.0]))).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnsupportedValueType { name } if name == "Double"
        ));
    }

    #[test]
    fn empty_array_is_allowed() {
        let set = coerce("Int64", &[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.kind(), ValueKind::Int64);
    }

    #[test]
    fn error_reports_offending_element() {
        let err = coerce("Bool", &values(json!([true, "yes"]))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value at index 1 cannot be read as Bool: found \"yes\""
        );
    }
}
