//! Dynamic values and wire-carried errors.

use crate::{Decode, Decoder, Error, Kind};
use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// An error value carried on the wire.
///
/// Formats that can encode errors (for example RPC envelopes) surface them
/// through this type; string and byte payloads decoded into an error slot
/// are wrapped into one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WireError {
    message: String,
}

impl WireError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WireError {}

impl Decode for WireError {
    fn empty() -> Self {
        Self::default()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let v = match kind {
            Kind::Nil => {
                d.nil()?;
                Self::default()
            }
            Kind::Error => d.error_value()?,
            Kind::String => Self::new(String::from_utf8_lossy(d.string_bytes()?)),
            Kind::Bytes => Self::new(String::from_utf8_lossy(d.byte_slice()?)),
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Error,
                })
            }
        };
        *slot = v;
        Ok(kind)
    }
}

/// A dynamically typed value: the canonical in-memory representation of any
/// wire kind.
///
/// Decoding into a `Value` accepts every kind and picks the representation
/// from the wire alone: integers become `i64`/`u64`, strings become owned
/// `String`s, composites recurse into dynamic elements. Map entries preserve
/// wire order; duplicate keys overwrite (last wins).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Bytes(Bytes),
    Time(DateTime<Utc>),
    Duration(TimeDelta),
    Error(WireError),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Looks up `key` when the value is a map.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Inserts with last-wins semantics, preserving first-seen order.
fn insert_entry(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

impl Decode for Value {
    fn empty() -> Self {
        Value::Nil
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let v = match kind {
            Kind::Nil => {
                d.nil()?;
                Value::Nil
            }
            Kind::Bool => Value::Bool(d.boolean()?),
            Kind::Int => Value::Int(d.int()?),
            Kind::Uint => Value::Uint(d.uint()?),
            Kind::Float => Value::Float(d.float()?),
            Kind::String => Value::String(String::from_utf8_lossy(d.string_bytes()?).into_owned()),
            Kind::Bytes => Value::Bytes(Bytes::copy_from_slice(d.byte_slice()?)),
            Kind::Time => Value::Time(d.time()?),
            Kind::Duration => Value::Duration(d.duration()?),
            Kind::Error => Value::Error(d.error_value()?),
            Kind::Array => {
                let mut items = Vec::new();
                d.array_from_kind(kind, |d| {
                    let mut item = Value::Nil;
                    Value::decode_into(d, &mut item)?;
                    items.push(item);
                    Ok(())
                })?;
                Value::Array(items)
            }
            Kind::Map => {
                let mut entries = Vec::new();
                d.map_from_kind(kind, |d| {
                    let mut key = Value::Nil;
                    let mut value = Value::Nil;
                    Value::decode_into(d, &mut key)?;
                    d.decode_map_value()?;
                    Value::decode_into(d, &mut value)?;
                    insert_entry(&mut entries, key, value);
                    Ok(())
                })?;
                Value::Map(entries)
            }
        };
        *slot = v;
        Ok(kind)
    }
}
