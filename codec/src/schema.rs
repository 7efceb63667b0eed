//! Record schemas and the process-wide strategy registry.

use crate::{Decode, Decoder, Error, Kind, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};
use tracing::trace;

/// One field of a record schema: decodes the wire value into its sub-slot
/// of the record.
struct FieldDef<T> {
    decode: Box<dyn Fn(&mut Decoder<'_>, &mut T) -> Result<Kind, Error> + Send + Sync>,
}

/// Describes how a record type appears on the wire: which field names to
/// expect and where each one lands in the target.
///
/// Lookups by wire name are O(1) and allocation-free; keys are compared
/// against parser-borrowed bytes without copying.
///
/// ```
/// use objwire_codec::StructSchema;
///
/// #[derive(Default)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let schema = StructSchema::new()
///     .field("x", |p: &mut Point| &mut p.x)
///     .field("y", |p: &mut Point| &mut p.y);
/// assert_eq!(schema.len(), 2);
/// ```
pub struct StructSchema<T> {
    fields: HashMap<Box<[u8]>, FieldDef<T>>,
}

impl<T> StructSchema<T> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: 'static> StructSchema<T> {
    /// Adds a field appearing as `name` on the wire, located in the target
    /// by `locator`.
    pub fn field<F: Decode + 'static>(
        mut self,
        name: &'static str,
        locator: fn(&mut T) -> &mut F,
    ) -> Self {
        let previous = self.fields.insert(
            name.as_bytes().into(),
            FieldDef {
                decode: Box::new(move |d, slot| F::decode_into(d, locator(slot))),
            },
        );
        assert!(previous.is_none(), "field {name} declared twice");
        self
    }
}

impl<T> Default for StructSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A record type with a wire schema.
///
/// Implementors typically pair this with a two-line [`Decode`] impl that
/// delegates to [`Decoder::decode_struct`] via [`schema_of`].
pub trait DecodeRecord: Decode + 'static {
    /// Builds the wire schema for this record type.
    ///
    /// Called once per process; use [`schema_of`] to get the cached copy.
    fn schema() -> StructSchema<Self>;
}

static REGISTRY: OnceLock<RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>> =
    OnceLock::new();

/// Returns the cached schema for `T`, building and registering it on first
/// use.
///
/// Schemas live in a process-wide table keyed by type identity, so repeated
/// decodes pay a single read-lock lookup. Self-referential records work
/// because field decoders resolve their element strategies lazily, at first
/// decode, by which point the entry exists.
pub fn schema_of<T: DecodeRecord>() -> &'static StructSchema<T> {
    let registry = REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    let id = TypeId::of::<T>();
    {
        let read = registry.read().expect("schema registry poisoned");
        if let Some(entry) = read.get(&id) {
            return entry
                .downcast_ref()
                .expect("schema registered under the wrong type id");
        }
    }

    let built = T::schema();
    let mut write = registry.write().expect("schema registry poisoned");
    let entry = *write.entry(id).or_insert_with(|| {
        trace!(
            record = std::any::type_name::<T>(),
            fields = built.len(),
            "registered struct schema"
        );
        let leaked: &'static StructSchema<T> = Box::leak(Box::new(built));
        leaked
    });
    entry
        .downcast_ref()
        .expect("schema registered under the wrong type id")
}

impl Decoder<'_> {
    /// Decodes a record described by `schema` into `slot`.
    ///
    /// Each key must arrive as a string kind and is matched against the
    /// schema without copying; unknown fields are consumed into a dynamic
    /// sink and discarded. `Nil` clears the record, and any failure clears
    /// it before propagating, so partial records are never observable.
    pub fn decode_struct<T: Decode>(
        &mut self,
        schema: &StructSchema<T>,
        slot: &mut T,
    ) -> Result<Kind, Error> {
        let kind = self.kind()?;
        let result = self.map_from_kind(kind, |d| {
            let key_kind = d.kind()?;
            if key_kind != Kind::String {
                return Err(Error::UnexpectedKeyType(key_kind));
            }
            let field = {
                let name = d.string_bytes()?;
                schema.fields.get(name)
            };
            d.decode_map_value()?;
            match field {
                Some(field) => (field.decode)(d, &mut *slot).map(|_| ()),
                None => {
                    let mut sink = Value::empty();
                    Value::decode_into(d, &mut sink).map(|_| ())
                }
            }
        });
        if let Err(err) = result {
            *slot = T::empty();
            return Err(err);
        }
        if kind == Kind::Nil {
            *slot = T::empty();
        }
        Ok(kind)
    }
}
