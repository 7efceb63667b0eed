//! The core decoding trait.

use crate::{Decoder, Error, Kind};

/// Trait for types that can be decoded from a token stream.
///
/// Implementations are provided for primitives, `String`, [`bytes::Bytes`],
/// `Vec<T>`, fixed arrays, `HashMap`/`BTreeMap`, `Option<T>`/`Box<T>`,
/// timestamps and durations, and the dynamic [`Value`](crate::Value). Record
/// types implement it by delegating to
/// [`Decoder::decode_struct`](crate::Decoder::decode_struct); types with
/// custom wire representations delegate to
/// [`Decoder::decode_with`](crate::Decoder::decode_with) or
/// [`Decoder::decode_text`](crate::Decoder::decode_text).
pub trait Decode: Sized {
    /// The zero/empty sentinel of this shape.
    ///
    /// Written when the wire carries `nil`, used to reset scratch slots
    /// between composite elements, and left behind when a failed decode
    /// clears its target.
    fn empty() -> Self;

    /// Pulls exactly one value from the stream into `slot`, returning the
    /// wire kind that was consumed.
    ///
    /// On failure the slot is left in a defined state: untouched, fully
    /// written, or reset to [`Decode::empty`], depending on the shape.
    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error>;
}
