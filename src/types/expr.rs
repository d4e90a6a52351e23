use std::fmt;
use std::time::Instant;

use super::evaluation_report::EvaluationReport;
use super::rule::{AttributePath, OperatorKind};
use super::literal::LiteralSet;
use crate::operator::Check;

/// Compiled rule tree: attribute paths are resolved to accessors and every
/// comparison is a ready-to-run check bound to one record type.
///
/// `And` and `Or` hold their operands in evaluation order and short-circuit
/// left to right.
///
/// This is the structural form returned by
/// [`RuleCompiler::compile_expression`](crate::RuleCompiler::compile_expression).
/// It can be interpreted directly or finalized into a [`Predicate`](crate::Predicate).
pub enum CompiledExpr<R> {
    Const(bool),
    Compare {
        attribute: AttributePath,
        operator: OperatorKind,
        value: LiteralSet,
        check: Check<R>,
    },
    And(Vec<CompiledExpr<R>>),
    Or(Vec<CompiledExpr<R>>),
    Not(Box<CompiledExpr<R>>),
}

impl<R> CompiledExpr<R> {
    /// Evaluate the tree against one record.
    #[must_use]
    pub fn evaluate(&self, record: &R) -> bool {
        crate::evaluate::eval_expr(self, record)
    }

    /// Evaluate with diagnostics: which comparisons ran, which held, and how long it took.
    pub fn evaluate_detailed(&self, record: &R) -> EvaluationReport {
        let start = Instant::now();
        let mut evaluated = Vec::new();
        let mut satisfied = Vec::new();
        let result =
            crate::evaluate::eval_traced(self, record, &mut evaluated, &mut satisfied);
        EvaluationReport::new(result, evaluated, satisfied, start.elapsed())
    }

    /// Number of comparison leaves in the tree.
    #[must_use]
    pub fn comparisons(&self) -> usize {
        match self {
            CompiledExpr::Const(_) => 0,
            CompiledExpr::Compare { .. } => 1,
            CompiledExpr::And(operands) | CompiledExpr::Or(operands) => {
                operands.iter().map(CompiledExpr::comparisons).sum()
            }
            CompiledExpr::Not(inner) => inner.comparisons(),
        }
    }

    pub(crate) fn describe_compare(
        attribute: &AttributePath,
        operator: OperatorKind,
        value: &LiteralSet,
    ) -> String {
        format!("{attribute} {operator} {value}")
    }
}

impl<R> fmt::Display for CompiledExpr<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompiledExpr::Const(v) => write!(f, "{}", if *v { "TRUE" } else { "FALSE" }),
            CompiledExpr::Compare {
                attribute,
                operator,
                value,
                ..
            } => write!(f, "({})", Self::describe_compare(attribute, *operator, value)),
            CompiledExpr::And(operands) => write_joined(f, operands, "AND"),
            CompiledExpr::Or(operands) => write_joined(f, operands, "OR"),
            CompiledExpr::Not(inner) => write!(f, "(NOT {inner})"),
        }
    }
}

fn write_joined<R>(
    f: &mut fmt::Formatter<'_>,
    operands: &[CompiledExpr<R>],
    op: &str,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write!(f, "{operand}")?;
    }
    write!(f, ")")
}

impl<R> fmt::Debug for CompiledExpr<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompiledExpr::Const(v) => f.debug_tuple("Const").field(v).finish(),
            CompiledExpr::Compare {
                attribute,
                operator,
                value,
                ..
            } => f
                .debug_struct("Compare")
                .field("attribute", attribute)
                .field("operator", operator)
                .field("value", value)
                .finish_non_exhaustive(),
            CompiledExpr::And(operands) => f.debug_tuple("And").field(operands).finish(),
            CompiledExpr::Or(operands) => f.debug_tuple("Or").field(operands).finish(),
            CompiledExpr::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}
