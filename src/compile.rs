use crate::resolve::resolve;
use crate::{CompileError, CompiledExpr, Record, RuleNode};

/// Compile a rule tree into a [`CompiledExpr`] bound to record type `R`.
///
/// Children of `And`/`Or` keep their order in one flat group, so wide groups
/// do not deepen the tree. An empty `And` compiles to `true` and an empty `Or`
/// to `false`; a single child compiles to itself. The first error encountered
/// is returned unchanged.
pub(crate) fn compile<R: Record>(
    node: &RuleNode,
    max_depth: usize,
) -> Result<CompiledExpr<R>, CompileError> {
    compile_node(node, max_depth, max_depth)
}

fn compile_node<R: Record>(
    node: &RuleNode,
    depth_left: usize,
    limit: usize,
) -> Result<CompiledExpr<R>, CompileError> {
    if depth_left == 0 {
        return Err(CompileError::DepthLimitExceeded { limit });
    }
    match node {
        RuleNode::And(children) => group(children, depth_left, limit, true, CompiledExpr::And),
        RuleNode::Or(children) => group(children, depth_left, limit, false, CompiledExpr::Or),
        RuleNode::Not(inner) => Ok(CompiledExpr::Not(Box::new(compile_node(
            inner,
            depth_left - 1,
            limit,
        )?))),
        RuleNode::Predicate {
            attribute,
            operator,
            value,
        } => {
            let field = resolve::<R>(attribute)?;
            let check = crate::operator::build(*operator, attribute.as_str(), &field, value)?;
            tracing::trace!(%attribute, %operator, kind = %field.kind(), "compiled comparison");
            Ok(CompiledExpr::Compare {
                attribute: attribute.clone(),
                operator: *operator,
                value: value.clone(),
                check,
            })
        }
    }
}

fn group<R: Record>(
    children: &[RuleNode],
    depth_left: usize,
    limit: usize,
    identity: bool,
    combine: fn(Vec<CompiledExpr<R>>) -> CompiledExpr<R>,
) -> Result<CompiledExpr<R>, CompileError> {
    let mut operands = children
        .iter()
        .map(|child| compile_node(child, depth_left - 1, limit))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match operands.len() {
        0 => CompiledExpr::Const(identity),
        1 => operands.remove(0),
        _ => combine(operands),
    })
}
