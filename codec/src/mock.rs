//! An in-memory parser replaying a scripted token stream.
//!
//! Useful for exercising decode logic without a format backend, both in
//! this crate's tests and in downstream ones.

use crate::{Error, Kind, Next, Parser, WireError};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::VecDeque;

/// One scripted wire token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Time(DateTime<Utc>),
    Duration(TimeDelta),
    Error(String),
    /// Opens an array; `None` streams elements until [`Token::ArrayEnd`].
    ArrayBegin(Option<usize>),
    ArrayEnd,
    /// Opens a map; `None` streams pairs until [`Token::MapEnd`].
    MapBegin(Option<usize>),
    MapEnd,
}

impl Token {
    fn kind(&self) -> Option<Kind> {
        Some(match self {
            Token::Nil => Kind::Nil,
            Token::Bool(_) => Kind::Bool,
            Token::Int(_) => Kind::Int,
            Token::Uint(_) => Kind::Uint,
            Token::Float(_) => Kind::Float,
            Token::String(_) => Kind::String,
            Token::Bytes(_) => Kind::Bytes,
            Token::Time(_) => Kind::Time,
            Token::Duration(_) => Kind::Duration,
            Token::Error(_) => Kind::Error,
            Token::ArrayBegin(_) => Kind::Array,
            Token::MapBegin(_) => Kind::Map,
            Token::ArrayEnd | Token::MapEnd => return None,
        })
    }
}

/// An open composite: whether its length was announced up front, and
/// whether the end marker was already consumed by the `End` sentinel.
struct Scope {
    known: bool,
    closed: bool,
}

/// A [`Parser`] that replays a token list.
///
/// String and byte payloads are served out of a single scratch buffer that
/// is reused on every pull, matching the borrowed-until-next-call contract
/// real backends have.
pub struct TokenParser {
    tokens: VecDeque<Token>,
    scopes: Vec<Scope>,
    scratch: Vec<u8>,
}

impl TokenParser {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            scopes: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// True once every token has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }

    fn pop(&mut self) -> Result<Token, Error> {
        self.tokens.pop_front().ok_or(Error::EndOfInput)
    }

    fn mismatch() -> Error {
        Error::Invalid("token", "pull does not match the scripted stream")
    }

    fn serve(&mut self, payload: &[u8]) -> &[u8] {
        self.scratch.clear();
        self.scratch.extend_from_slice(payload);
        &self.scratch
    }
}

impl Parser for TokenParser {
    fn parse_type(&mut self) -> Result<Kind, Error> {
        let front = self.tokens.front().ok_or(Error::EndOfInput)?;
        front.kind().ok_or_else(Self::mismatch)
    }

    fn parse_nil(&mut self) -> Result<(), Error> {
        match self.pop()? {
            Token::Nil => Ok(()),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_bool(&mut self) -> Result<bool, Error> {
        match self.pop()? {
            Token::Bool(v) => Ok(v),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_int(&mut self) -> Result<i64, Error> {
        match self.pop()? {
            Token::Int(v) => Ok(v),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_uint(&mut self) -> Result<u64, Error> {
        match self.pop()? {
            Token::Uint(v) => Ok(v),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_float(&mut self) -> Result<f64, Error> {
        match self.pop()? {
            Token::Float(v) => Ok(v),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_string(&mut self) -> Result<&[u8], Error> {
        match self.pop()? {
            Token::String(v) => {
                let owned = v.into_bytes();
                Ok(self.serve(&owned))
            }
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_bytes(&mut self) -> Result<&[u8], Error> {
        match self.pop()? {
            Token::Bytes(v) => Ok(self.serve(&v)),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_time(&mut self) -> Result<DateTime<Utc>, Error> {
        match self.pop()? {
            Token::Time(v) => Ok(v),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_duration(&mut self) -> Result<TimeDelta, Error> {
        match self.pop()? {
            Token::Duration(v) => Ok(v),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_error(&mut self) -> Result<WireError, Error> {
        match self.pop()? {
            Token::Error(v) => Ok(WireError::new(v)),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_array_begin(&mut self) -> Result<Option<usize>, Error> {
        match self.pop()? {
            Token::ArrayBegin(len) => {
                self.scopes.push(Scope {
                    known: len.is_some(),
                    closed: false,
                });
                Ok(len)
            }
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_array_next(&mut self, _i: usize) -> Result<Next, Error> {
        let scope = self.scopes.last_mut().ok_or_else(Self::mismatch)?;
        if !scope.known && matches!(self.tokens.front(), Some(Token::ArrayEnd)) {
            scope.closed = true;
            self.tokens.pop_front();
            return Ok(Next::End);
        }
        Ok(Next::Item)
    }

    fn parse_array_end(&mut self, _n: usize) -> Result<(), Error> {
        let scope = self.scopes.pop().ok_or_else(Self::mismatch)?;
        if scope.closed {
            return Ok(());
        }
        match self.pop()? {
            Token::ArrayEnd => Ok(()),
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_map_begin(&mut self) -> Result<Option<usize>, Error> {
        match self.pop()? {
            Token::MapBegin(len) => {
                self.scopes.push(Scope {
                    known: len.is_some(),
                    closed: false,
                });
                Ok(len)
            }
            _ => Err(Self::mismatch()),
        }
    }

    fn parse_map_next(&mut self, _i: usize) -> Result<Next, Error> {
        let scope = self.scopes.last_mut().ok_or_else(Self::mismatch)?;
        if !scope.known && matches!(self.tokens.front(), Some(Token::MapEnd)) {
            scope.closed = true;
            self.tokens.pop_front();
            return Ok(Next::End);
        }
        Ok(Next::Item)
    }

    fn parse_map_value(&mut self, _i: usize) -> Result<(), Error> {
        // Token streams carry no separator between key and value.
        Ok(())
    }

    fn parse_map_end(&mut self, _n: usize) -> Result<(), Error> {
        let scope = self.scopes.pop().ok_or_else(Self::mismatch)?;
        if scope.closed {
            return Ok(());
        }
        match self.pop()? {
            Token::MapEnd => Ok(()),
            _ => Err(Self::mismatch()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_reused_between_pulls() {
        let mut parser = TokenParser::new([
            Token::String("alpha".into()),
            Token::String("be".into()),
        ]);
        assert_eq!(parser.parse_type().unwrap(), Kind::String);
        assert_eq!(parser.parse_string().unwrap(), b"alpha");
        assert_eq!(parser.parse_type().unwrap(), Kind::String);
        assert_eq!(parser.parse_string().unwrap(), b"be");
        assert!(parser.is_exhausted());
    }

    #[test]
    fn test_end_of_input() {
        let mut parser = TokenParser::new([]);
        assert!(matches!(parser.parse_type(), Err(Error::EndOfInput)));
    }

    #[test]
    fn test_mismatched_pull() {
        let mut parser = TokenParser::new([Token::Bool(true)]);
        assert!(matches!(parser.parse_int(), Err(Error::Invalid(..))));
    }
}
