use thiserror::Error;

use super::rule::OperatorKind;
use super::value::ValueKind;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("the '{tag}' statement type is not supported")]
    UnsupportedStatementType { tag: String },

    #[error("the '{operator}' operator is not supported")]
    UnsupportedOperator { operator: String },

    #[error("the '{name}' value type is not supported")]
    UnsupportedValueType { name: String },

    #[error("value at index {index} cannot be read as {kind}: found {found}")]
    ValueCoercion {
        index: usize,
        kind: ValueKind,
        found: String,
    },

    #[error("unknown attribute '{attribute}': '{segment}' is not a field of '{record}'")]
    UnknownAttribute {
        attribute: String,
        segment: String,
        record: String,
    },

    #[error("attribute '{attribute}' names record '{record}', not a value field")]
    NotAValueField { attribute: String, record: String },

    #[error(
        "operator '{operator}' cannot compare field '{attribute}' of type {field} with {literal} values"
    )]
    OperatorTypeMismatch {
        attribute: String,
        operator: OperatorKind,
        field: ValueKind,
        literal: ValueKind,
    },

    #[error("operator '{operator}' on '{attribute}' requires at least one value")]
    EmptyLiteralSet {
        attribute: String,
        operator: OperatorKind,
    },

    #[error("missing property '{property}' on {node} node")]
    MissingProperty { node: String, property: String },

    #[error("property '{property}' must be {expected}")]
    InvalidProperty {
        property: String,
        expected: &'static str,
    },

    #[error("rule nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}
