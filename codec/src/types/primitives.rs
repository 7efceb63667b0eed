//! Decode implementations for booleans, integers, floats, and the unit
//! (nil) shape.
//!
//! Integers accept both wire sign kinds and are range-checked against the
//! mathematical bounds of the target width; the native-width `isize` and
//! `usize` get 64-bit limits.

use crate::{Decode, Decoder, Error, Kind};

impl Decode for bool {
    fn empty() -> Self {
        false
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let v = match kind {
            Kind::Nil => {
                d.nil()?;
                false
            }
            Kind::Bool => d.boolean()?,
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Bool,
                })
            }
        };
        *slot = v;
        Ok(kind)
    }
}

/// The nil shape: accepts only `Nil` on the wire.
impl Decode for () {
    fn empty() -> Self {}

    fn decode_into(d: &mut Decoder<'_>, _slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        match kind {
            Kind::Nil => d.nil()?,
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Nil,
                })
            }
        }
        Ok(kind)
    }
}

macro_rules! impl_decode_int {
    ($to:expr, $($ty:ty),+ $(,)?) => {
        $(
            impl Decode for $ty {
                fn empty() -> Self {
                    0
                }

                fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
                    let kind = d.kind()?;
                    let v: $ty = match kind {
                        Kind::Nil => {
                            d.nil()?;
                            0
                        }
                        Kind::Int => {
                            let raw = d.int()?;
                            <$ty>::try_from(raw).map_err(|_| Error::Overflow {
                                value: raw as i128,
                                target: stringify!($ty),
                            })?
                        }
                        Kind::Uint => {
                            let raw = d.uint()?;
                            <$ty>::try_from(raw).map_err(|_| Error::Overflow {
                                value: raw as i128,
                                target: stringify!($ty),
                            })?
                        }
                        from => return Err(Error::TypeConversion { from, to: $to }),
                    };
                    *slot = v;
                    Ok(kind)
                }
            }
        )+
    };
}

impl_decode_int!(Kind::Int, i8, i16, i32, i64, isize);
impl_decode_int!(Kind::Uint, u8, u16, u32, u64, usize);

macro_rules! impl_decode_float {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Decode for $ty {
                fn empty() -> Self {
                    0.0
                }

                fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
                    let kind = d.kind()?;
                    let v: $ty = match kind {
                        Kind::Nil => {
                            d.nil()?;
                            0.0
                        }
                        Kind::Int => d.int()? as $ty,
                        Kind::Uint => d.uint()? as $ty,
                        Kind::Float => d.float()? as $ty,
                        from => {
                            return Err(Error::TypeConversion {
                                from,
                                to: Kind::Float,
                            })
                        }
                    };
                    *slot = v;
                    Ok(kind)
                }
            }
        )+
    };
}

impl_decode_float!(f32, f64);
