//! Decode structured data from any wire format.
//!
//! # Overview
//!
//! A format-agnostic decoding engine: one [`Decoder`] implementation works
//! against any number of wire formats (JSON, CBOR, MessagePack, YAML, …)
//! merely by swapping the [`Parser`] behind it. The parser yields a stream
//! of dynamically typed tokens; the decoder bridges that stream with the
//! statically typed target, enforcing numeric bounds and structural
//! constraints while recursing into composite shapes.
//!
//! # Supported Targets
//!
//! Natively supports:
//! - Primitives: `bool`, `u8`–`u64`/`usize`, `i8`–`i64`/`isize`, `f32`,
//!   `f64`
//! - Text and bytes: `String`, [`bytes::Bytes`]
//! - Collections: `Vec<T>`, fixed arrays `[T; N]`, `HashMap`/`BTreeMap`
//! - Indirections: `Option<T>`, `Box<T>`
//! - Time: [`chrono::DateTime<Utc>`](chrono::DateTime),
//!   [`chrono::TimeDelta`]
//! - The dynamic [`Value`], accepting any wire kind
//!
//! Record types plug in through a [`StructSchema`]; types with custom wire
//! representations take over decoding via the [`DecodeValue`] and
//! [`UnmarshalText`] capability hooks.
//!
//! # Example
//!
//! ```
//! use objwire_codec::{
//!     mock::{Token, TokenParser},
//!     schema_of, Decode, DecodeRecord, Decoder, Error, Kind, StructSchema,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Decode for Person {
//!     fn empty() -> Self {
//!         Self::default()
//!     }
//!
//!     fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
//!         d.decode_struct(schema_of::<Person>(), slot)
//!     }
//! }
//!
//! impl DecodeRecord for Person {
//!     fn schema() -> StructSchema<Self> {
//!         StructSchema::new()
//!             .field("name", |p: &mut Person| &mut p.name)
//!             .field("age", |p: &mut Person| &mut p.age)
//!     }
//! }
//!
//! // Any Parser works here; the scripted one stands in for a real format.
//! let mut parser = TokenParser::new([
//!     Token::MapBegin(Some(2)),
//!     Token::String("name".into()),
//!     Token::String("Ada".into()),
//!     Token::String("age".into()),
//!     Token::Int(36),
//!     Token::MapEnd,
//! ]);
//!
//! let mut decoder = Decoder::new(&mut parser);
//! let person: Person = decoder.decode_owned()?;
//! assert_eq!(
//!     person,
//!     Person {
//!         name: "Ada".into(),
//!         age: 36,
//!     }
//! );
//! # Ok::<(), objwire_codec::Error>(())
//! ```

mod decode;
mod decoder;
mod error;
mod hooks;
mod kind;
mod parser;
mod schema;
mod value;

pub mod mock;
pub mod types;

pub use decode::Decode;
pub use decoder::Decoder;
pub use error::Error;
pub use hooks::{DecodeValue, UnmarshalText};
pub use kind::Kind;
pub use parser::{Next, Parser};
pub use schema::{schema_of, DecodeRecord, StructSchema};
pub use value::{Value, WireError};
