//! Capability hooks by which target types take over their own decoding.

use crate::{Decode, Decoder, Error, Kind};
use bytes::Bytes;

/// Implemented by types that provide their own decoding algorithm.
///
/// The implementor receives the decoder positioned at its value and must
/// consume exactly one value from the stream, typically through
/// [`Decoder::decode`] calls on its components. Register the capability by
/// delegating the type's [`Decode`] impl to [`Decoder::decode_with`]:
///
/// ```
/// use objwire_codec::{Decode, DecodeValue, Decoder, Error, Kind};
///
/// #[derive(Default)]
/// struct Celsius(f64);
///
/// impl DecodeValue for Celsius {
///     fn decode_value(&mut self, d: &mut Decoder<'_>) -> Result<(), Error> {
///         d.decode(&mut self.0)
///     }
/// }
///
/// impl Decode for Celsius {
///     fn empty() -> Self {
///         Self::default()
///     }
///
///     fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
///         d.decode_with(slot)
///     }
/// }
/// ```
pub trait DecodeValue {
    fn decode_value(&mut self, d: &mut Decoder<'_>) -> Result<(), Error>;
}

/// Implemented by types that decode themselves from a textual byte
/// sequence.
///
/// The decoder pulls a byte-sequence-shaped value (strings and byte
/// payloads both qualify, `nil` yields an empty slice) and forwards it.
/// Register the capability by delegating the type's [`Decode`] impl to
/// [`Decoder::decode_text`].
pub trait UnmarshalText {
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), Error>;
}

impl Decoder<'_> {
    /// Hands the stream to a [`DecodeValue`] implementor.
    pub fn decode_with(&mut self, slot: &mut dyn DecodeValue) -> Result<Kind, Error> {
        slot.decode_value(self)?;
        // Just needs to not be Nil, so optional and dynamic wrappers keep
        // the hook-decoded value.
        Ok(Kind::Bool)
    }

    /// Pulls a byte sequence and hands it to an [`UnmarshalText`]
    /// implementor.
    pub fn decode_text(&mut self, slot: &mut dyn UnmarshalText) -> Result<Kind, Error> {
        let mut text = Bytes::new();
        let kind = Bytes::decode_into(self, &mut text)?;
        slot.unmarshal_text(&text)?;
        Ok(kind)
    }
}
