//! The decoder driver.

use crate::{Decode, Error, Kind, Next, Parser, WireError};
use chrono::{DateTime, TimeDelta, Utc};
use smallvec::SmallVec;

/// Decodes values from a streaming [`Parser`].
///
/// A decoder is constructed around a parser, used for any number of
/// top-level [`decode`](Self::decode) calls, and then discarded. Long-lived
/// parsers may be reused across decoders. The driver pulls one token at a
/// time, strictly in stream order, and is not safe for concurrent use.
pub struct Decoder<'p> {
    parser: &'p mut dyn Parser,
    /// One entry per open map scope: the index of the pair being read.
    offsets: SmallVec<[usize; 20]>,
}

impl<'p> Decoder<'p> {
    /// Creates a decoder that reads from `parser`.
    pub fn new(parser: &'p mut dyn Parser) -> Self {
        Self {
            parser,
            offsets: SmallVec::new(),
        }
    }

    /// Reads exactly one value from the parser into `slot`.
    ///
    /// On failure `slot` holds a defined value: untouched, fully written,
    /// or its shape's empty sentinel, depending on the target shape.
    pub fn decode<T: Decode>(&mut self, slot: &mut T) -> Result<(), Error> {
        T::decode_into(self, slot)?;
        Ok(())
    }

    /// Reads one value into a fresh [`Decode::empty`] slot and returns it.
    pub fn decode_owned<T: Decode>(&mut self) -> Result<T, Error> {
        let mut value = T::empty();
        T::decode_into(self, &mut value)?;
        Ok(value)
    }

    /// Reads a sequence of arbitrary length, invoking `f` once per element
    /// with the decoder positioned to read that element.
    ///
    /// Returns the wire kind that was consumed, so callers can distinguish
    /// `Array` from `Nil`.
    pub fn decode_array<F>(&mut self, f: F) -> Result<Kind, Error>
    where
        F: FnMut(&mut Self) -> Result<(), Error>,
    {
        let kind = self.kind()?;
        self.array_from_kind(kind, f)?;
        Ok(kind)
    }

    /// Reads a map of arbitrary length, invoking `f` once per pair.
    ///
    /// `f` must consume exactly one key, call
    /// [`decode_map_value`](Self::decode_map_value), then consume exactly
    /// one value. Returns the wire kind that was consumed.
    pub fn decode_map<F>(&mut self, f: F) -> Result<Kind, Error>
    where
        F: FnMut(&mut Self) -> Result<(), Error>,
    {
        let kind = self.kind()?;
        self.map_from_kind(kind, f)?;
        Ok(kind)
    }

    /// Advances the parser from the key to the value of the current map
    /// pair.
    ///
    /// # Panics
    ///
    /// Calling this outside of a map-entry callback is a programmer error
    /// and panics.
    pub fn decode_map_value(&mut self) -> Result<(), Error> {
        let i = *self
            .offsets
            .last()
            .expect("decode_map_value called outside of a map entry");
        self.parser.parse_map_value(i)
    }

    /// Drives the array loop for an already-consumed `kind`.
    ///
    /// `Nil` consumes the nil and invokes `f` zero times. A known length
    /// loops exactly that many elements; an unknown length terminates on
    /// the [`Next::End`] sentinel. The closing bracket always receives the
    /// number of elements consumed.
    pub(crate) fn array_from_kind(
        &mut self,
        kind: Kind,
        mut f: impl FnMut(&mut Self) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let len = match kind {
            Kind::Nil => {
                self.parser.parse_nil()?;
                return Ok(());
            }
            Kind::Array => self.parser.parse_array_begin()?,
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Array,
                })
            }
        };

        let mut i = 0;
        while len.map_or(true, |n| i < n) {
            if (i > 0 || len.is_none()) && self.parser.parse_array_next(i)? == Next::End {
                break;
            }
            f(self)?;
            i += 1;
        }
        self.parser.parse_array_end(i)
    }

    /// Drives the map loop for an already-consumed `kind`.
    ///
    /// Symmetric with [`array_from_kind`](Self::array_from_kind), with one
    /// extra duty: the pair index is pushed on the offsets stack around the
    /// callback and popped on all exit paths, so
    /// [`decode_map_value`](Self::decode_map_value) can report it to the
    /// parser.
    pub(crate) fn map_from_kind(
        &mut self,
        kind: Kind,
        mut f: impl FnMut(&mut Self) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let len = match kind {
            Kind::Nil => {
                self.parser.parse_nil()?;
                return Ok(());
            }
            Kind::Map => self.parser.parse_map_begin()?,
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Map,
                })
            }
        };

        let mut i = 0;
        while len.map_or(true, |n| i < n) {
            if (i > 0 || len.is_none()) && self.parser.parse_map_next(i)? == Next::End {
                break;
            }
            self.offsets.push(i);
            let entry = f(self);
            self.offsets.pop();
            entry?;
            i += 1;
        }
        self.parser.parse_map_end(i)
    }

    pub(crate) fn kind(&mut self) -> Result<Kind, Error> {
        self.parser.parse_type()
    }

    pub(crate) fn nil(&mut self) -> Result<(), Error> {
        self.parser.parse_nil()
    }

    pub(crate) fn boolean(&mut self) -> Result<bool, Error> {
        self.parser.parse_bool()
    }

    pub(crate) fn int(&mut self) -> Result<i64, Error> {
        self.parser.parse_int()
    }

    pub(crate) fn uint(&mut self) -> Result<u64, Error> {
        self.parser.parse_uint()
    }

    pub(crate) fn float(&mut self) -> Result<f64, Error> {
        self.parser.parse_float()
    }

    pub(crate) fn string_bytes(&mut self) -> Result<&[u8], Error> {
        self.parser.parse_string()
    }

    pub(crate) fn byte_slice(&mut self) -> Result<&[u8], Error> {
        self.parser.parse_bytes()
    }

    pub(crate) fn time(&mut self) -> Result<DateTime<Utc>, Error> {
        self.parser.parse_time()
    }

    pub(crate) fn duration(&mut self) -> Result<TimeDelta, Error> {
        self.parser.parse_duration()
    }

    pub(crate) fn error_value(&mut self) -> Result<WireError, Error> {
        self.parser.parse_error()
    }
}
