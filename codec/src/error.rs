//! Decoding errors.

use crate::Kind;
use thiserror::Error;

/// Errors returned by decode operations and parser backends.
///
/// The first failure terminates the current decode and propagates to the
/// caller unchanged; the engine never retries parser operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The wire kind cannot be converted into the target shape.
    #[error("cannot decode {from} into {to}")]
    TypeConversion { from: Kind, to: Kind },
    /// An integer on the wire does not fit the target width.
    #[error("value {value} overflows {target}")]
    Overflow { value: i128, target: &'static str },
    /// A fixed-length sequence received a different number of elements.
    #[error("expected {expected} elements for {target}")]
    ArrayLength {
        expected: usize,
        target: &'static str,
    },
    /// No decode strategy exists for the target shape.
    ///
    /// The built-in target types always have a strategy; parser backends
    /// return this for kinds their format cannot represent.
    #[error("unsupported type: {0}")]
    UnsupportedType(&'static str),
    /// A record field key was not a string.
    #[error("map key must be a string, got {0}")]
    UnexpectedKeyType(Kind),
    /// The parser ran out of input mid-value.
    #[error("unexpected end of input")]
    EndOfInput,
    /// A payload was malformed for the target shape.
    #[error("invalid {0}: {1}")]
    Invalid(&'static str, &'static str),
}
