use std::cmp::Ordering;
use std::sync::Arc;

use crate::{CompileError, FieldAccessor, Literal, LiteralSet, OperatorKind, ValueKind};

/// A compiled boolean test over one record.
pub(crate) type Check<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

pub(crate) fn check<R, F>(f: F) -> Check<R>
where
    F: Fn(&R) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Combine a resolved field and its literals into a check for `operator`.
///
/// All type compatibility is decided here, so the returned check cannot fail.
/// An absent field value never satisfies any operator.
pub(crate) fn build<R: 'static>(
    operator: OperatorKind,
    attribute: &str,
    field: &FieldAccessor<R>,
    literals: &LiteralSet,
) -> Result<Check<R>, CompileError> {
    match operator {
        OperatorKind::Contains => contains(attribute, field, literals),
        OperatorKind::Equals => equals(attribute, field, literals),
        OperatorKind::StartsWith => starts_with(attribute, field, literals),
        OperatorKind::GreaterThan => greater_than(attribute, field, literals),
    }
}

fn contains<R: 'static>(
    attribute: &str,
    field: &FieldAccessor<R>,
    literals: &LiteralSet,
) -> Result<Check<R>, CompileError> {
    require_kind(OperatorKind::Contains, attribute, field, literals.kind())?;
    let read = field.reader();
    let set = literals.clone();
    Ok(check(move |record: &R| {
        read(record).is_some_and(|value| set.contains(&value))
    }))
}

fn equals<R: 'static>(
    attribute: &str,
    field: &FieldAccessor<R>,
    literals: &LiteralSet,
) -> Result<Check<R>, CompileError> {
    require_kind(OperatorKind::Equals, attribute, field, literals.kind())?;
    let want = single(OperatorKind::Equals, attribute, literals)?;
    let read = field.reader();
    Ok(check(move |record: &R| {
        read(record).is_some_and(|value| value.matches(&want))
    }))
}

fn starts_with<R: 'static>(
    attribute: &str,
    field: &FieldAccessor<R>,
    literals: &LiteralSet,
) -> Result<Check<R>, CompileError> {
    if field.kind() != ValueKind::String {
        return Err(mismatch(
            OperatorKind::StartsWith,
            attribute,
            field,
            literals.kind(),
        ));
    }
    let prefix = single(OperatorKind::StartsWith, attribute, literals)?.to_text();
    let read = field.reader();
    Ok(check(move |record: &R| {
        read(record).is_some_and(|value| value.starts_with(&prefix))
    }))
}

fn greater_than<R: 'static>(
    attribute: &str,
    field: &FieldAccessor<R>,
    literals: &LiteralSet,
) -> Result<Check<R>, CompileError> {
    if !field.kind().is_ordered() {
        return Err(mismatch(
            OperatorKind::GreaterThan,
            attribute,
            field,
            literals.kind(),
        ));
    }
    require_kind(OperatorKind::GreaterThan, attribute, field, literals.kind())?;
    let bound = single(OperatorKind::GreaterThan, attribute, literals)?;
    let read = field.reader();
    Ok(check(move |record: &R| {
        read(record).and_then(|value| value.compare(&bound)) == Some(Ordering::Greater)
    }))
}

fn require_kind<R>(
    operator: OperatorKind,
    attribute: &str,
    field: &FieldAccessor<R>,
    literal: ValueKind,
) -> Result<(), CompileError>
where
    R: 'static,
{
    if field.kind() == literal {
        Ok(())
    } else {
        Err(mismatch(operator, attribute, field, literal))
    }
}

fn mismatch<R: 'static>(
    operator: OperatorKind,
    attribute: &str,
    field: &FieldAccessor<R>,
    literal: ValueKind,
) -> CompileError {
    CompileError::OperatorTypeMismatch {
        attribute: attribute.to_owned(),
        operator,
        field: field.kind(),
        literal,
    }
}

/// The literal used by single-value operators: the first one.
fn single(
    operator: OperatorKind,
    attribute: &str,
    literals: &LiteralSet,
) -> Result<Literal, CompileError> {
    let first = literals
        .first()
        .ok_or_else(|| CompileError::EmptyLiteralSet {
            attribute: attribute.to_owned(),
            operator,
        })?;
    if literals.len() > 1 {
        tracing::warn!(
            %attribute,
            %operator,
            count = literals.len(),
            "operator uses only the first of several values"
        );
    }
    Ok(first.clone())
}
