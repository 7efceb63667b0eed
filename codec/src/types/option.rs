//! Decode implementations for nullable and plain indirections.

use crate::{Decode, Decoder, Error, Kind};

/// The optional slot: `nil` on the wire clears it, any other kind creates
/// the indirection on demand and recurses into the inner shape.
impl<T: Decode> Decode for Option<T> {
    fn empty() -> Self {
        None
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        match slot {
            Some(inner) => {
                let kind = T::decode_into(d, inner)?;
                if kind == Kind::Nil {
                    *slot = None;
                }
                Ok(kind)
            }
            None => {
                let mut inner = T::empty();
                let kind = T::decode_into(d, &mut inner)?;
                if kind != Kind::Nil {
                    *slot = Some(inner);
                }
                Ok(kind)
            }
        }
    }
}

/// A plain (non-nullable) indirection; decodes through to the inner shape.
impl<T: Decode> Decode for Box<T> {
    fn empty() -> Self {
        Box::new(T::empty())
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        T::decode_into(d, slot)
    }
}
