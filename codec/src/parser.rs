//! The pull contract a format backend implements.

use crate::{Error, Kind, WireError};
use chrono::{DateTime, TimeDelta, Utc};

/// Signal returned by [`Parser::parse_array_next`] and
/// [`Parser::parse_map_next`].
///
/// `End` is only produced for composites opened with an unknown length; it
/// marks clean termination of the element stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Next {
    Item,
    End,
}

/// A streaming parser over one wire format.
///
/// The decoder pulls tokens strictly in stream order: [`parse_type`] exposes
/// the kind of the upcoming value, then exactly one matching pull consumes
/// it. `Array` and `Map` open a child stream bracketed by the `begin`/`end`
/// calls, with `next` called between elements.
///
/// Slices returned by [`parse_string`] and [`parse_bytes`] borrow the
/// parser's scratch memory and are valid only until its next method call;
/// callers that retain the payload must copy it.
///
/// Formats without a native representation for a kind should return
/// [`Error::UnsupportedType`] from the corresponding pull.
///
/// [`parse_type`]: Parser::parse_type
/// [`parse_string`]: Parser::parse_string
/// [`parse_bytes`]: Parser::parse_bytes
pub trait Parser {
    /// Returns the kind of the next value in the stream.
    fn parse_type(&mut self) -> Result<Kind, Error>;

    /// Consumes a nil.
    fn parse_nil(&mut self) -> Result<(), Error>;

    /// Consumes a boolean.
    fn parse_bool(&mut self) -> Result<bool, Error>;

    /// Consumes a signed integer.
    fn parse_int(&mut self) -> Result<i64, Error>;

    /// Consumes an unsigned integer.
    fn parse_uint(&mut self) -> Result<u64, Error>;

    /// Consumes a floating point number.
    fn parse_float(&mut self) -> Result<f64, Error>;

    /// Consumes a string, returning its raw bytes.
    fn parse_string(&mut self) -> Result<&[u8], Error>;

    /// Consumes a byte sequence.
    fn parse_bytes(&mut self) -> Result<&[u8], Error>;

    /// Consumes a timestamp.
    fn parse_time(&mut self) -> Result<DateTime<Utc>, Error>;

    /// Consumes a duration.
    fn parse_duration(&mut self) -> Result<TimeDelta, Error>;

    /// Consumes an error value.
    fn parse_error(&mut self) -> Result<WireError, Error>;

    /// Opens an array. `None` means the length is unknown and the element
    /// stream is terminated by [`Next::End`].
    fn parse_array_begin(&mut self) -> Result<Option<usize>, Error>;

    /// Advances to element `i` of the current array.
    fn parse_array_next(&mut self, i: usize) -> Result<Next, Error>;

    /// Closes an array after `n` elements were consumed.
    fn parse_array_end(&mut self, n: usize) -> Result<(), Error>;

    /// Opens a map. `None` means the number of pairs is unknown.
    fn parse_map_begin(&mut self) -> Result<Option<usize>, Error>;

    /// Advances to pair `i` of the current map.
    fn parse_map_next(&mut self, i: usize) -> Result<Next, Error>;

    /// Called between the key and the value of pair `i`, so formats can
    /// render separators (the colon in JSON).
    fn parse_map_value(&mut self, i: usize) -> Result<(), Error>;

    /// Closes a map after `n` pairs were consumed.
    fn parse_map_end(&mut self, n: usize) -> Result<(), Error>;
}
