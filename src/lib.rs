mod coerce;
mod compile;
mod error;
mod evaluate;
mod operator;
mod parse;
mod resolve;
mod types;

pub use error::JsonRuleError;
pub use parse::statement;
pub use resolve::resolve;
pub use types::{
    attribute, AttributeExpr, AttributePath, CompileError, CompiledExpr, EvaluationReport,
    FieldAccessor, FieldValue, Literal, LiteralSet, OperatorKind, Predicate, Record, RuleCompiler,
    RuleNode, Schema, ValueKind, DEFAULT_MAX_DEPTH,
};

use serde_json::Value as Json;

/// Compile a JSON rule document into its structural form using default settings.
///
/// # Errors
///
/// Returns [`CompileError`] on any parse or compile failure.
pub fn compile_expression<R: Record>(document: &Json) -> Result<CompiledExpr<R>, CompileError> {
    RuleCompiler::new().compile_expression(document)
}

/// Compile a JSON rule document into a callable [`Predicate`] using default settings.
///
/// # Errors
///
/// Returns [`CompileError`] on any parse or compile failure.
pub fn compile_predicate<R: Record>(document: &Json) -> Result<Predicate<R>, CompileError> {
    RuleCompiler::new().compile_predicate(document)
}

impl RuleNode {
    /// Parse a JSON rule document using the default depth limit.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the document is not a valid rule tree.
    pub fn from_json(document: &Json) -> Result<Self, CompileError> {
        parse::parse_node(document, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DEPTH)
    }
}

impl std::str::FromStr for RuleNode {
    type Err = JsonRuleError;

    /// Parse JSON text into a rule tree.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let document: Json = serde_json::from_str(input)?;
        Ok(Self::from_json(&document)?)
    }
}
