use serde_json::{Map, Value as Json};

use super::statement;
use crate::coerce::coerce;
use crate::{AttributePath, CompileError, OperatorKind, RuleNode};

const TYPE_KEYS: [&str; 2] = ["$type", "type"];

/// Parse one JSON rule node, recursing into children.
///
/// `depth_left` counts how many more levels may be opened below this one.
pub(crate) fn parse_node(doc: &Json, depth_left: usize, limit: usize) -> Result<RuleNode, CompileError> {
    if depth_left == 0 {
        return Err(CompileError::DepthLimitExceeded { limit });
    }
    let object = doc.as_object().ok_or_else(|| CompileError::InvalidProperty {
        property: "statement".to_owned(),
        expected: "a JSON object",
    })?;
    let tag = statement_tag(object)?;

    match tag.to_ascii_lowercase().as_str() {
        statement::AND => Ok(RuleNode::And(parse_children(object, "and", depth_left, limit)?)),
        statement::OR => Ok(RuleNode::Or(parse_children(object, "or", depth_left, limit)?)),
        statement::NOT => {
            let child = property(object, "not", "statement")?;
            Ok(RuleNode::Not(Box::new(parse_node(child, depth_left - 1, limit)?)))
        }
        statement::PREDICATE => parse_predicate(object),
        _ => Err(CompileError::UnsupportedStatementType { tag: tag.to_owned() }),
    }
}

fn statement_tag(object: &Map<String, Json>) -> Result<&str, CompileError> {
    let (key, value) = TYPE_KEYS
        .iter()
        .find_map(|key| object.get(*key).map(|v| (*key, v)))
        .ok_or_else(|| CompileError::MissingProperty {
            node: "statement".to_owned(),
            property: TYPE_KEYS[0].to_owned(),
        })?;
    value.as_str().ok_or_else(|| CompileError::InvalidProperty {
        property: key.to_owned(),
        expected: "a string",
    })
}

fn parse_children(
    object: &Map<String, Json>,
    node: &str,
    depth_left: usize,
    limit: usize,
) -> Result<Vec<RuleNode>, CompileError> {
    let children = property(object, node, "statements")?
        .as_array()
        .ok_or_else(|| CompileError::InvalidProperty {
            property: "statements".to_owned(),
            expected: "an array of statements",
        })?;
    children
        .iter()
        .map(|child| parse_node(child, depth_left - 1, limit))
        .collect()
}

fn parse_predicate(object: &Map<String, Json>) -> Result<RuleNode, CompileError> {
    let attribute = string_property(object, "attribute")?;
    let operator_name = string_property(object, "operator")?;
    let operator = OperatorKind::from_name(operator_name).ok_or_else(|| {
        CompileError::UnsupportedOperator {
            operator: operator_name.to_owned(),
        }
    })?;

    let value = property(object, "predicate", "value")?
        .as_object()
        .ok_or_else(|| CompileError::InvalidProperty {
            property: "value".to_owned(),
            expected: "an object with 'valueType' and 'values'",
        })?;
    let value_type = string_property(value, "valueType")?;
    let values = property(value, "value", "values")?
        .as_array()
        .ok_or_else(|| CompileError::InvalidProperty {
            property: "values".to_owned(),
            expected: "an array",
        })?;

    Ok(RuleNode::Predicate {
        attribute: AttributePath::new(attribute),
        operator,
        value: coerce(value_type, values)?,
    })
}

fn property<'a>(
    object: &'a Map<String, Json>,
    node: &str,
    name: &str,
) -> Result<&'a Json, CompileError> {
    object.get(name).ok_or_else(|| CompileError::MissingProperty {
        node: node.to_owned(),
        property: name.to_owned(),
    })
}

fn string_property<'a>(object: &'a Map<String, Json>, name: &str) -> Result<&'a str, CompileError> {
    property(object, "predicate", name)?
        .as_str()
        .ok_or_else(|| CompileError::InvalidProperty {
            property: name.to_owned(),
            expected: "a string",
        })
}
