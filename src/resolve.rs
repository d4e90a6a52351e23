use crate::types::Lookup;
use crate::{AttributePath, CompileError, FieldAccessor, Record};

/// Resolve a dotted attribute path against `R`'s schema into a reusable accessor.
///
/// Resolution happens once per predicate node; the returned accessor only reads
/// fields when evaluated.
///
/// # Errors
///
/// Returns [`CompileError::UnknownAttribute`] when a segment does not name a
/// field of the type reached so far, and [`CompileError::NotAValueField`] when
/// the path stops on a nested record.
pub fn resolve<R: Record>(path: &AttributePath) -> Result<FieldAccessor<R>, CompileError> {
    let segments: Vec<&str> = path.segments().collect();
    resolve_segments::<R>(path.as_str(), &segments)
}

pub(crate) fn resolve_segments<R: Record>(
    attribute: &str,
    segments: &[&str],
) -> Result<FieldAccessor<R>, CompileError> {
    let schema = R::schema();
    let unknown = |segment: &str, record: &str| CompileError::UnknownAttribute {
        attribute: attribute.to_owned(),
        segment: segment.to_owned(),
        record: record.to_owned(),
    };

    let Some((first, rest)) = segments.split_first() else {
        return Err(unknown("", schema.name()));
    };

    match (schema.lookup(first), rest) {
        (None, _) => {
            tracing::debug!(
                %attribute,
                segment = *first,
                record = schema.name(),
                known = ?schema.field_names().collect::<Vec<_>>(),
                "attribute segment not found"
            );
            Err(unknown(*first, schema.name()))
        }
        (Some(Lookup::Value(accessor)), []) => Ok(accessor),
        (Some(Lookup::Value(accessor)), [next, ..]) => {
            Err(unknown(*next, accessor.kind().name()))
        }
        (Some(Lookup::Nested { record, .. }), []) => Err(CompileError::NotAValueField {
            attribute: attribute.to_owned(),
            record: record.to_owned(),
        }),
        (Some(Lookup::Nested { descend, .. }), rest) => descend(attribute, rest),
    }
}
