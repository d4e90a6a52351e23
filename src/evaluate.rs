use crate::operator::{check, Check};
use crate::CompiledExpr;

pub(crate) fn eval_expr<R>(expr: &CompiledExpr<R>, record: &R) -> bool {
    match expr {
        CompiledExpr::Const(v) => *v,
        CompiledExpr::Compare { check, .. } => check(record),
        CompiledExpr::And(operands) => operands.iter().all(|e| eval_expr(e, record)),
        CompiledExpr::Or(operands) => operands.iter().any(|e| eval_expr(e, record)),
        CompiledExpr::Not(inner) => !eval_expr(inner, record),
    }
}

/// Like [`eval_expr`], recording every comparison that ran and every one that held.
/// Short-circuited comparisons are not recorded.
pub(crate) fn eval_traced<R>(
    expr: &CompiledExpr<R>,
    record: &R,
    evaluated: &mut Vec<String>,
    satisfied: &mut Vec<String>,
) -> bool {
    match expr {
        CompiledExpr::Const(v) => *v,
        CompiledExpr::Compare {
            attribute,
            operator,
            value,
            check,
        } => {
            let label = CompiledExpr::<R>::describe_compare(attribute, *operator, value);
            let result = check(record);
            if result {
                satisfied.push(label.clone());
            }
            evaluated.push(label);
            result
        }
        CompiledExpr::And(operands) => operands
            .iter()
            .all(|e| eval_traced(e, record, evaluated, satisfied)),
        CompiledExpr::Or(operands) => operands
            .iter()
            .any(|e| eval_traced(e, record, evaluated, satisfied)),
        CompiledExpr::Not(inner) => !eval_traced(inner, record, evaluated, satisfied),
    }
}

/// Fold the tree into a single closure so evaluation no longer walks the tree.
pub(crate) fn finalize<R: 'static>(expr: CompiledExpr<R>) -> Check<R> {
    match expr {
        CompiledExpr::Const(v) => check(move |_: &R| v),
        CompiledExpr::Compare { check, .. } => check,
        CompiledExpr::And(operands) => {
            let checks: Vec<Check<R>> = operands.into_iter().map(finalize).collect();
            check(move |record: &R| checks.iter().all(|c| c(record)))
        }
        CompiledExpr::Or(operands) => {
            let checks: Vec<Check<R>> = operands.into_iter().map(finalize).collect();
            check(move |record: &R| checks.iter().any(|c| c(record)))
        }
        CompiledExpr::Not(inner) => {
            let inner = finalize(*inner);
            check(move |record: &R| !inner(record))
        }
    }
}
