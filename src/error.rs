use thiserror::Error;

use crate::CompileError;

/// Unified error type covering JSON decoding, compilation, and I/O.
///
/// Returned by convenience methods like
/// [`RuleCompiler::predicate_from_str()`](crate::RuleCompiler::predicate_from_str)
/// and [`RuleCompiler::predicate_from_file()`](crate::RuleCompiler::predicate_from_file).
#[derive(Debug, Error)]
pub enum JsonRuleError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
