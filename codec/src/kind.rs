//! Wire token kinds.

use std::fmt;

/// The kind of the next value a parser will yield.
///
/// The set is closed: every format backend maps its wire types onto these
/// twelve kinds, and every decode strategy matches exhaustively against them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Bytes,
    Time,
    Duration,
    Error,
    Array,
    Map,
}

impl Kind {
    /// Lowercase name, as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Time => "time",
            Kind::Duration => "duration",
            Kind::Error => "error",
            Kind::Array => "array",
            Kind::Map => "map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
