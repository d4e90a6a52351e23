use std::fmt;
use std::ops::Not;

use super::literal::LiteralSet;

/// Comparison operators available on predicate nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// The field's value is one of the literals.
    Contains,
    /// The field's value equals the first literal.
    Equals,
    /// The string field starts with the first literal.
    StartsWith,
    /// The field's value is strictly greater than the first literal.
    GreaterThan,
}

impl OperatorKind {
    /// Look up an operator by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            OperatorKind::Contains,
            OperatorKind::Equals,
            OperatorKind::StartsWith,
            OperatorKind::GreaterThan,
        ]
        .into_iter()
        .find(|op| op.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Contains => "contains",
            OperatorKind::Equals => "equals",
            OperatorKind::StartsWith => "startswith",
            OperatorKind::GreaterThan => "greaterthan",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dotted path such as `"Context.Customer.Name"` naming a field reachable
/// from the record root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath(String);

impl AttributePath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The path's field names, split on `.`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// A node of a boolean rule tree.
///
/// Produced by [`RuleNode::from_json`](crate::RuleNode::from_json) or built in
/// code with [`attribute()`] and the combinators below.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleNode {
    And(Vec<RuleNode>),
    Or(Vec<RuleNode>),
    Not(Box<RuleNode>),
    Predicate {
        attribute: AttributePath,
        operator: OperatorKind,
        value: LiteralSet,
    },
}

impl RuleNode {
    /// Conjunction of all `nodes`.
    #[must_use]
    pub fn all(nodes: impl IntoIterator<Item = RuleNode>) -> RuleNode {
        RuleNode::And(nodes.into_iter().collect())
    }

    /// Disjunction of all `nodes`.
    #[must_use]
    pub fn any(nodes: impl IntoIterator<Item = RuleNode>) -> RuleNode {
        RuleNode::Or(nodes.into_iter().collect())
    }

    #[must_use]
    pub fn and(self, other: RuleNode) -> RuleNode {
        match self {
            RuleNode::And(mut nodes) => {
                nodes.push(other);
                RuleNode::And(nodes)
            }
            node => RuleNode::And(vec![node, other]),
        }
    }

    #[must_use]
    pub fn or(self, other: RuleNode) -> RuleNode {
        match self {
            RuleNode::Or(mut nodes) => {
                nodes.push(other);
                RuleNode::Or(nodes)
            }
            node => RuleNode::Or(vec![node, other]),
        }
    }
}

impl Not for RuleNode {
    type Output = RuleNode;

    fn not(self) -> RuleNode {
        RuleNode::Not(Box::new(self))
    }
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleNode::And(nodes) => write_joined(f, nodes, "AND"),
            RuleNode::Or(nodes) => write_joined(f, nodes, "OR"),
            RuleNode::Not(inner) => write!(f, "(NOT {inner})"),
            RuleNode::Predicate {
                attribute,
                operator,
                value,
            } => write!(f, "({attribute} {operator} {value})"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, nodes: &[RuleNode], op: &str) -> fmt::Result {
    if nodes.is_empty() {
        return write!(f, "({op})");
    }
    write!(f, "(")?;
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write!(f, "{node}")?;
    }
    write!(f, ")")
}

/// Intermediate builder for predicate nodes.
/// Created by [`attribute()`]; requires an operator method to produce a [`RuleNode`].
#[derive(Debug, Clone)]
pub struct AttributeExpr {
    path: AttributePath,
}

impl AttributeExpr {
    fn predicate(self, operator: OperatorKind, value: impl Into<LiteralSet>) -> RuleNode {
        RuleNode::Predicate {
            attribute: self.path,
            operator,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn contains(self, values: impl Into<LiteralSet>) -> RuleNode {
        self.predicate(OperatorKind::Contains, values)
    }

    #[must_use]
    pub fn equals(self, value: impl Into<LiteralSet>) -> RuleNode {
        self.predicate(OperatorKind::Equals, value)
    }

    #[must_use]
    pub fn starts_with(self, prefix: impl Into<LiteralSet>) -> RuleNode {
        self.predicate(OperatorKind::StartsWith, prefix)
    }

    #[must_use]
    pub fn greater_than(self, value: impl Into<LiteralSet>) -> RuleNode {
        self.predicate(OperatorKind::GreaterThan, value)
    }
}

#[must_use]
pub fn attribute(path: &str) -> AttributeExpr {
    AttributeExpr {
        path: AttributePath::new(path),
    }
}
