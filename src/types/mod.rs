mod error;
mod evaluation_report;
mod expr;
mod literal;
mod predicate;
mod record;
mod rule;
mod value;

pub use error::CompileError;
pub use evaluation_report::EvaluationReport;
pub use expr::CompiledExpr;
pub use literal::LiteralSet;
pub use predicate::{Predicate, RuleCompiler, DEFAULT_MAX_DEPTH};
pub use record::{FieldAccessor, Record, Schema};
pub use rule::{attribute, AttributeExpr, AttributePath, OperatorKind, RuleNode};
pub use value::{FieldValue, Literal, ValueKind};

pub(crate) use record::Lookup;
