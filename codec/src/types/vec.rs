//! Decode implementation for growable sequences.

use crate::{Decode, Decoder, Error, Kind};

/// Initial capacity for freshly allocated sequences; most wire arrays are
/// short, and unknown-length streams cannot pre-size.
const INITIAL_CAPACITY: usize = 20;

impl<T: Decode> Decode for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let mut out = Vec::with_capacity(INITIAL_CAPACITY);
        d.array_from_kind(kind, |d| {
            let mut element = T::empty();
            T::decode_into(d, &mut element)?;
            out.push(element);
            Ok(())
        })?;
        // An element failure above discards the partial collection and
        // leaves the slot untouched.
        *slot = if kind == Kind::Nil { Vec::new() } else { out };
        Ok(kind)
    }
}
