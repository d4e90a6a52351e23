use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::error::CompileError;
use super::value::{FieldValue, ValueKind};

/// Reads one field out of a record. `None` means the value is absent.
pub(crate) type Reader<R> =
    Arc<dyn for<'a> Fn(&'a R) -> Option<FieldValue<'a>> + Send + Sync>;

type Descend<R> = Box<dyn Fn(&str, &[&str]) -> Result<FieldAccessor<R>, CompileError>>;

/// A type whose fields can be addressed by dotted attribute paths.
///
/// # Example
///
/// ```
/// use jsonrule::{Record, Schema};
///
/// struct Customer {
///     name: String,
/// }
///
/// struct Order {
///     id: i64,
///     customer: Option<Customer>,
/// }
///
/// impl Record for Customer {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::new("Customer").string("Name", |c| c.name.as_str())
///     }
/// }
///
/// impl Record for Order {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::new("Order")
///             .int64("Id", |o| o.id)
///             .nested("Customer", |o| o.customer.as_ref())
///     }
/// }
/// ```
pub trait Record: Sized + 'static {
    /// The accessor table for this type. Consulted only while compiling.
    fn schema() -> Schema<Self>;
}

/// Accessor table describing the readable fields of a [`Record`].
pub struct Schema<R> {
    name: &'static str,
    fields: Vec<FieldDef<R>>,
}

struct FieldDef<R> {
    name: &'static str,
    slot: FieldSlot<R>,
}

enum FieldSlot<R> {
    Value { kind: ValueKind, read: Reader<R> },
    Nested {
        record: fn() -> &'static str,
        descend: Descend<R>,
    },
}

/// Where a path segment landed during resolution.
pub(crate) enum Lookup<'s, R> {
    Value(FieldAccessor<R>),
    Nested {
        record: &'static str,
        descend: &'s Descend<R>,
    },
}

impl<R: Record> Schema<R> {
    /// Start an empty schema. Name the record type up front
    /// (`Schema::<Self>::new(..)`) so the getter closures that follow can be
    /// type-checked.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn int32<F>(self, name: &'static str, get: F) -> Self
    where
        F: Fn(&R) -> i32 + Send + Sync + 'static,
    {
        self.field(name, ValueKind::Int32, move |r| Some(FieldValue::Int32(get(r))))
    }

    #[must_use]
    pub fn int64<F>(self, name: &'static str, get: F) -> Self
    where
        F: Fn(&R) -> i64 + Send + Sync + 'static,
    {
        self.field(name, ValueKind::Int64, move |r| Some(FieldValue::Int64(get(r))))
    }

    #[must_use]
    pub fn string<F>(self, name: &'static str, get: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> &'a str + Send + Sync + 'static,
    {
        self.field(name, ValueKind::String, move |r| {
            Some(FieldValue::String(get(r)))
        })
    }

    #[must_use]
    pub fn decimal<F>(self, name: &'static str, get: F) -> Self
    where
        F: Fn(&R) -> Decimal + Send + Sync + 'static,
    {
        self.field(name, ValueKind::Decimal, move |r| {
            Some(FieldValue::Decimal(get(r)))
        })
    }

    #[must_use]
    pub fn bool<F>(self, name: &'static str, get: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.field(name, ValueKind::Bool, move |r| Some(FieldValue::Bool(get(r))))
    }

    /// Register a value field with a raw reader. Returning `None` marks the
    /// value as absent, which makes every comparison on it false.
    ///
    /// The reader must only yield values of `kind`; values of any other kind
    /// never match.
    #[must_use]
    pub fn field<F>(mut self, name: &'static str, kind: ValueKind, read: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> Option<FieldValue<'a>> + Send + Sync + 'static,
    {
        self.fields.push(FieldDef {
            name,
            slot: FieldSlot::Value {
                kind,
                read: Arc::new(read),
            },
        });
        self
    }

    /// Register a nested record. A getter returning `None` makes every field
    /// below it read as absent.
    #[must_use]
    pub fn nested<C, F>(mut self, name: &'static str, get: F) -> Self
    where
        C: Record,
        F: for<'a> Fn(&'a R) -> Option<&'a C> + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let descend: Descend<R> = Box::new(move |attribute: &str, rest: &[&str]| {
            let inner = crate::resolve::resolve_segments::<C>(attribute, rest)?;
            Ok(inner.through(Arc::clone(&get)))
        });
        self.fields.push(FieldDef {
            name,
            slot: FieldSlot::Nested {
                record: schema_name::<C>,
                descend,
            },
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of all registered fields, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub(crate) fn lookup(&self, segment: &str) -> Option<Lookup<'_, R>> {
        let def = self.fields.iter().find(|f| f.name == segment)?;
        Some(match &def.slot {
            FieldSlot::Value { kind, read } => Lookup::Value(FieldAccessor {
                kind: *kind,
                read: Arc::clone(read),
            }),
            FieldSlot::Nested { record, descend } => Lookup::Nested {
                record: record(),
                descend,
            },
        })
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field(
                "fields",
                &self.fields.iter().map(|d| d.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A resolved attribute path: the final field's kind plus a reader rooted at `R`.
pub struct FieldAccessor<R> {
    kind: ValueKind,
    read: Reader<R>,
}

impl<R: 'static> FieldAccessor<R> {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Read the field from a record.
    #[must_use]
    pub fn read<'a>(&self, record: &'a R) -> Option<FieldValue<'a>> {
        (self.read)(record)
    }

    pub(crate) fn reader(&self) -> Reader<R> {
        Arc::clone(&self.read)
    }

    /// Re-root this accessor at a parent type through a nested getter.
    fn through<P, G>(self, get: Arc<G>) -> FieldAccessor<P>
    where
        P: 'static,
        G: for<'a> Fn(&'a P) -> Option<&'a R> + Send + Sync + 'static + ?Sized,
    {
        let inner = self.read;
        FieldAccessor {
            kind: self.kind,
            read: rooted(move |parent| get(parent).and_then(|child| inner(child))),
        }
    }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            read: Arc::clone(&self.read),
        }
    }
}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

// Resolved lazily so self-referencing record types do not recurse while
// building their schema.
fn schema_name<C: Record>() -> &'static str {
    C::schema().name
}

fn rooted<P, F>(read: F) -> Reader<P>
where
    F: for<'a> Fn(&'a P) -> Option<FieldValue<'a>> + Send + Sync + 'static,
{
    Arc::new(read)
}
