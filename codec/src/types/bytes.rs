//! Decode implementations for text and byte targets.
//!
//! Parser-returned slices are only valid until the next parser call, so
//! both targets copy the payload into fresh owned storage.

use crate::{Decode, Decoder, Error, Kind};
use bytes::Bytes;

impl Decode for String {
    fn empty() -> Self {
        String::new()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let v = match kind {
            Kind::Nil => {
                d.nil()?;
                String::new()
            }
            // Byte payloads are reinterpreted as text; invalid UTF-8 is
            // replaced rather than rejected.
            Kind::String => String::from_utf8_lossy(d.string_bytes()?).into_owned(),
            Kind::Bytes => String::from_utf8_lossy(d.byte_slice()?).into_owned(),
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::String,
                })
            }
        };
        *slot = v;
        Ok(kind)
    }
}

impl Decode for Bytes {
    fn empty() -> Self {
        Bytes::new()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let v = match kind {
            Kind::Nil => {
                d.nil()?;
                Bytes::new()
            }
            Kind::String => Bytes::copy_from_slice(d.string_bytes()?),
            Kind::Bytes => Bytes::copy_from_slice(d.byte_slice()?),
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Bytes,
                })
            }
        };
        *slot = v;
        Ok(kind)
    }
}
