use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value as Json;

use super::error::CompileError;
use super::evaluation_report::EvaluationReport;
use super::expr::CompiledExpr;
use super::record::Record;
use super::rule::RuleNode;
use crate::operator::Check;

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Builder that compiles rule documents for record type `R`.
///
/// # Example
///
/// ```
/// use jsonrule::{Record, RuleCompiler, Schema};
/// use serde_json::json;
///
/// struct Order {
///     id: i32,
/// }
///
/// impl Record for Order {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::new("Order").int32("Id", |o| o.id)
///     }
/// }
///
/// let predicate = RuleCompiler::<Order>::new()
///     .max_depth(16)
///     .compile_predicate(&json!({
///         "$type": "predicate",
///         "attribute": "Id",
///         "operator": "contains",
///         "value": { "valueType": "Int32", "values": [1, 2] }
///     }))
///     .unwrap();
///
/// assert!(predicate.test(&Order { id: 2 }));
/// assert!(!predicate.test(&Order { id: 3 }));
/// ```
pub struct RuleCompiler<R> {
    max_depth: usize,
    _record: PhantomData<fn(&R) -> bool>,
}

impl<R: Record> RuleCompiler<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            _record: PhantomData,
        }
    }

    /// Maximum nesting depth of a rule tree. Deeper trees fail with
    /// [`CompileError::DepthLimitExceeded`].
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Parse a JSON rule document into a [`RuleNode`] tree.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] for unknown tags, operators or value types,
    /// malformed nodes, literals that do not parse, or excessive nesting.
    pub fn parse(&self, document: &Json) -> Result<RuleNode, CompileError> {
        crate::parse::parse_node(document, self.max_depth, self.max_depth)
    }

    /// Compile an already-built rule tree into its structural form.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if an attribute does not resolve, an operator
    /// does not fit the field's type, or the tree is too deep.
    pub fn compile_node(&self, node: &RuleNode) -> Result<CompiledExpr<R>, CompileError> {
        tracing::debug!(record = R::schema().name(), rule = %node, "compiling rule");
        let expr = crate::compile::compile::<R>(node, self.max_depth)?;
        tracing::debug!(comparisons = expr.comparisons(), "rule compiled");
        Ok(expr)
    }

    /// Parse and compile a JSON rule document into its structural form.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on any parse or compile failure.
    pub fn compile_expression(&self, document: &Json) -> Result<CompiledExpr<R>, CompileError> {
        let node = self.parse(document)?;
        self.compile_node(&node)
    }

    /// Parse and compile a JSON rule document into a callable [`Predicate`].
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on any parse or compile failure.
    pub fn compile_predicate(&self, document: &Json) -> Result<Predicate<R>, CompileError> {
        let node = self.parse(document)?;
        self.predicate_for(&node)
    }

    /// Compile an already-built rule tree into a callable [`Predicate`].
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on any compile failure.
    pub fn predicate_for(&self, node: &RuleNode) -> Result<Predicate<R>, CompileError> {
        let expr = self.compile_node(node)?;
        Ok(Predicate::from_expr(expr))
    }

    /// Parse JSON text and compile it into a [`Predicate`].
    ///
    /// # Errors
    ///
    /// Returns [`JsonRuleError`](crate::JsonRuleError) if the text is not JSON
    /// or the rule fails to compile.
    pub fn predicate_from_str(&self, json: &str) -> Result<Predicate<R>, crate::JsonRuleError> {
        let document: Json = serde_json::from_str(json)?;
        Ok(self.compile_predicate(&document)?)
    }

    /// Read a JSON rule file and compile it into a [`Predicate`].
    ///
    /// # Errors
    ///
    /// Returns [`JsonRuleError`](crate::JsonRuleError) on I/O, JSON, or compile failure.
    pub fn predicate_from_file(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Predicate<R>, crate::JsonRuleError> {
        let input = std::fs::read_to_string(path)?;
        self.predicate_from_str(&input)
    }
}

impl<R: Record> Default for RuleCompiler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for RuleCompiler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCompiler")
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// A compiled, reusable filter over records of type `R`.
///
/// Immutable and `Send + Sync`; cloning shares the compiled closure. Calling it
/// only reads fields, all resolution and type checks happened at compile time.
pub struct Predicate<R> {
    check: Check<R>,
    expr: Arc<CompiledExpr<R>>,
}

impl<R: 'static> Predicate<R> {
    pub(crate) fn from_expr(expr: CompiledExpr<R>) -> Self {
        let expr = Arc::new(expr);
        let check = crate::evaluate::finalize(rebuild(&expr));
        Self { check, expr }
    }

    /// Whether `record` satisfies the rule.
    #[inline]
    #[must_use]
    pub fn test(&self, record: &R) -> bool {
        (self.check)(record)
    }

    /// Borrowing adapter for `Iterator::filter`.
    ///
    /// ```ignore
    /// let matched: Vec<&Order> = orders.iter().filter(predicate.as_fn()).collect();
    /// ```
    pub fn as_fn(&self) -> impl Fn(&&R) -> bool + '_ {
        move |record: &&R| self.test(record)
    }

    /// Collect the records that satisfy the rule, preserving order.
    pub fn filter<'a, I>(&self, records: I) -> Vec<&'a R>
    where
        I: IntoIterator<Item = &'a R>,
    {
        records.into_iter().filter(|r| self.test(r)).collect()
    }

    /// Evaluate with diagnostics using the structural form.
    pub fn test_detailed(&self, record: &R) -> EvaluationReport {
        self.expr.evaluate_detailed(record)
    }

    /// The structural form this predicate was finalized from.
    #[must_use]
    pub fn expression(&self) -> &CompiledExpr<R> {
        &self.expr
    }
}

/// Shallow structural copy sharing every leaf check.
fn rebuild<R>(expr: &CompiledExpr<R>) -> CompiledExpr<R> {
    match expr {
        CompiledExpr::Const(v) => CompiledExpr::Const(*v),
        CompiledExpr::Compare {
            attribute,
            operator,
            value,
            check,
        } => CompiledExpr::Compare {
            attribute: attribute.clone(),
            operator: *operator,
            value: value.clone(),
            check: Arc::clone(check),
        },
        CompiledExpr::And(operands) => CompiledExpr::And(operands.iter().map(rebuild).collect()),
        CompiledExpr::Or(operands) => CompiledExpr::Or(operands.iter().map(rebuild).collect()),
        CompiledExpr::Not(inner) => CompiledExpr::Not(Box::new(rebuild(inner))),
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            expr: Arc::clone(&self.expr),
        }
    }
}

impl<R> fmt::Display for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate{}", self.expr)
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("expr", &self.expr)
            .finish_non_exhaustive()
    }
}
