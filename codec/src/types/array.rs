//! Decode implementation for fixed-length sequences.

use crate::{Decode, Decoder, Error, Kind, Value};
use std::any::type_name;

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn empty() -> Self {
        std::array::from_fn(|_| T::empty())
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        for cell in slot.iter_mut() {
            *cell = T::empty();
        }

        let mut i = 0;
        d.array_from_kind(kind, |d| {
            if i < N {
                T::decode_into(d, &mut slot[i])?;
            } else {
                // Excess elements are consumed so the stream stays
                // positioned after the array, then discarded.
                let mut sink = Value::empty();
                Value::decode_into(d, &mut sink)?;
            }
            i += 1;
            Ok(())
        })?;

        if kind != Kind::Nil && i != N {
            return Err(Error::ArrayLength {
                expected: N,
                target: type_name::<Self>(),
            });
        }
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Token, TokenParser};

    #[test]
    fn test_exact_length() {
        let mut parser = TokenParser::new([
            Token::ArrayBegin(Some(3)),
            Token::Int(1),
            Token::Int(2),
            Token::Int(3),
            Token::ArrayEnd,
        ]);
        let mut d = Decoder::new(&mut parser);
        let v: [i64; 3] = d.decode_owned().unwrap();
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn test_short_wire_array() {
        let mut parser = TokenParser::new([
            Token::ArrayBegin(Some(2)),
            Token::Int(1),
            Token::Int(2),
            Token::ArrayEnd,
        ]);
        let mut d = Decoder::new(&mut parser);
        let mut v: [i64; 3] = [9, 9, 9];
        let result = d.decode(&mut v);
        assert!(matches!(result, Err(Error::ArrayLength { expected: 3, .. })));
        // Cells were cleared first, then the two elements written.
        assert_eq!(v, [1, 2, 0]);
    }

    #[test]
    fn test_long_wire_array_drains() {
        let mut parser = TokenParser::new([
            Token::ArrayBegin(Some(4)),
            Token::Int(1),
            Token::Int(2),
            Token::Int(3),
            Token::Int(4),
            Token::ArrayEnd,
            Token::Bool(true),
        ]);
        let mut d = Decoder::new(&mut parser);
        let mut v: [i64; 2] = [0, 0];
        let result = d.decode(&mut v);
        assert!(matches!(result, Err(Error::ArrayLength { expected: 2, .. })));
        assert_eq!(v, [1, 2]);
        // The excess elements were consumed; the stream continues cleanly.
        let tail: bool = d.decode_owned().unwrap();
        assert!(tail);
    }

    #[test]
    fn test_nil_clears_cells() {
        let mut parser = TokenParser::new([Token::Nil]);
        let mut d = Decoder::new(&mut parser);
        let mut v: [u8; 2] = [5, 6];
        d.decode(&mut v).unwrap();
        assert_eq!(v, [0, 0]);
    }
}
