//! End-to-end decoding scenarios against a scripted parser.

use bytes::Bytes;
use objwire_codec::{
    mock::{Token, TokenParser},
    schema_of, Decode, DecodeRecord, Decoder, Error, Kind, StructSchema, Value,
};

#[derive(Debug, Default, PartialEq)]
struct Person {
    name: String,
    age: i64,
}

impl Decode for Person {
    fn empty() -> Self {
        Self::default()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        d.decode_struct(schema_of::<Person>(), slot)
    }
}

impl DecodeRecord for Person {
    fn schema() -> StructSchema<Self> {
        StructSchema::new()
            .field("name", |p: &mut Person| &mut p.name)
            .field("age", |p: &mut Person| &mut p.age)
    }
}

#[derive(Debug, Default, PartialEq)]
struct Node {
    label: String,
    next: Option<Box<Node>>,
}

impl Decode for Node {
    fn empty() -> Self {
        Self::default()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        d.decode_struct(schema_of::<Node>(), slot)
    }
}

impl DecodeRecord for Node {
    fn schema() -> StructSchema<Self> {
        StructSchema::new()
            .field("label", |n: &mut Node| &mut n.label)
            .field("next", |n: &mut Node| &mut n.next)
    }
}

#[test]
fn record_with_unknown_fields() {
    let mut parser = TokenParser::new([
        Token::MapBegin(Some(3)),
        Token::String("name".into()),
        Token::String("A".into()),
        Token::String("unknown".into()),
        Token::Bool(true),
        Token::String("age".into()),
        Token::Int(7),
        Token::MapEnd,
    ]);
    let mut d = Decoder::new(&mut parser);
    let person: Person = d.decode_owned().unwrap();
    assert_eq!(
        person,
        Person {
            name: "A".into(),
            age: 7,
        }
    );
    assert!(parser.is_exhausted());
}

#[test]
fn record_skips_composite_unknown_fields() {
    let mut parser = TokenParser::new([
        Token::MapBegin(Some(2)),
        Token::String("extra".into()),
        Token::MapBegin(None),
        Token::String("nested".into()),
        Token::ArrayBegin(Some(2)),
        Token::Int(1),
        Token::Int(2),
        Token::ArrayEnd,
        Token::MapEnd,
        Token::String("age".into()),
        Token::Int(41),
        Token::MapEnd,
    ]);
    let mut d = Decoder::new(&mut parser);
    let person: Person = d.decode_owned().unwrap();
    assert_eq!(person.age, 41);
    assert!(parser.is_exhausted());
}

#[test]
fn int_into_uint_positive() {
    let mut parser = TokenParser::new([Token::Int(300)]);
    let mut d = Decoder::new(&mut parser);
    let v: u16 = d.decode_owned().unwrap();
    assert_eq!(v, 300);
}

#[test]
fn int_into_uint_negative() {
    let mut parser = TokenParser::new([Token::Int(-1)]);
    let mut d = Decoder::new(&mut parser);
    let mut v: u16 = 0;
    let result = d.decode(&mut v);
    assert!(matches!(
        result,
        Err(Error::Overflow {
            value: -1,
            target: "u16",
        })
    ));
    assert_eq!(v, 0);
}

#[test]
fn unknown_length_array_streaming() {
    let mut parser = TokenParser::new([
        Token::ArrayBegin(None),
        Token::Int(1),
        Token::Int(2),
        Token::Int(3),
        Token::ArrayEnd,
    ]);
    let mut d = Decoder::new(&mut parser);
    let v: Vec<i64> = d.decode_owned().unwrap();
    assert_eq!(v, vec![1, 2, 3]);
    assert!(parser.is_exhausted());
}

#[test]
fn fixed_length_mismatch_drains_parser() {
    let mut parser = TokenParser::new([
        Token::ArrayBegin(Some(2)),
        Token::Int(1),
        Token::Int(2),
        Token::ArrayEnd,
        Token::String("after".into()),
    ]);
    let mut d = Decoder::new(&mut parser);
    let mut v: [i64; 3] = [0; 3];
    let result = d.decode(&mut v);
    assert!(matches!(result, Err(Error::ArrayLength { expected: 3, .. })));
    // Both elements were consumed and the bracket closed; the stream is
    // positioned after the array.
    let after: String = d.decode_owned().unwrap();
    assert_eq!(after, "after");
    assert!(parser.is_exhausted());
}

#[test]
fn dynamic_map_of_mixed_values() {
    let mut parser = TokenParser::new([
        Token::MapBegin(Some(2)),
        Token::String("k1".into()),
        Token::Int(1),
        Token::String("k2".into()),
        Token::ArrayBegin(Some(2)),
        Token::String("a".into()),
        Token::String("b".into()),
        Token::ArrayEnd,
        Token::MapEnd,
    ]);
    let mut d = Decoder::new(&mut parser);
    let v: Value = d.decode_owned().unwrap();

    let k1 = Value::String("k1".into());
    let k2 = Value::String("k2".into());
    assert_eq!(v.get(&k1), Some(&Value::Int(1)));
    assert_eq!(
        v.get(&k2),
        Some(&Value::Array(vec![
            Value::String("a".into()),
            Value::String("b".into()),
        ]))
    );
}

#[test]
fn nil_policy_across_shapes() {
    let mut parser = TokenParser::new(std::iter::repeat(Token::Nil).take(7));
    let mut d = Decoder::new(&mut parser);

    assert_eq!(d.decode_owned::<i32>().unwrap(), 0);
    assert_eq!(d.decode_owned::<String>().unwrap(), "");
    assert_eq!(d.decode_owned::<Bytes>().unwrap(), Bytes::new());
    assert_eq!(d.decode_owned::<Vec<u8>>().unwrap(), Vec::<u8>::new());
    assert_eq!(d.decode_owned::<Option<bool>>().unwrap(), None);
    assert_eq!(d.decode_owned::<Person>().unwrap(), Person::default());
    assert_eq!(d.decode_owned::<Value>().unwrap(), Value::Nil);
}

#[test]
fn byte_isolation_across_pulls() {
    let mut parser = TokenParser::new([
        Token::Bytes(b"retained".to_vec()),
        Token::String("overwrites the scratch".into()),
    ]);
    let mut d = Decoder::new(&mut parser);

    let retained: Bytes = d.decode_owned().unwrap();
    let _: String = d.decode_owned().unwrap();
    // The parser reused its scratch buffer on the second pull; the engine
    // must have copied.
    assert_eq!(retained, Bytes::from_static(b"retained"));
}

#[test]
fn self_referential_record() {
    let mut parser = TokenParser::new([
        Token::MapBegin(Some(2)),
        Token::String("label".into()),
        Token::String("head".into()),
        Token::String("next".into()),
        Token::MapBegin(Some(1)),
        Token::String("label".into()),
        Token::String("tail".into()),
        Token::MapEnd,
        Token::MapEnd,
    ]);
    let mut d = Decoder::new(&mut parser);
    let node: Node = d.decode_owned().unwrap();
    assert_eq!(node.label, "head");
    let next = node.next.expect("tail expected");
    assert_eq!(next.label, "tail");
    assert_eq!(next.next, None);
}

#[test]
fn decoder_recovers_after_drained_failure() {
    let mut parser = TokenParser::new([
        Token::ArrayBegin(Some(2)),
        Token::Int(1),
        Token::Int(2),
        Token::ArrayEnd,
        Token::MapBegin(Some(1)),
        Token::String("age".into()),
        Token::Int(30),
        Token::MapEnd,
    ]);
    let mut d = Decoder::new(&mut parser);

    let mut cells: [i64; 3] = [0; 3];
    assert!(matches!(
        d.decode(&mut cells),
        Err(Error::ArrayLength { expected: 3, .. })
    ));

    // The failure drained its composite and the map-index stack is back at
    // its starting depth; the next decode proceeds normally.
    let person: Person = d.decode_owned().unwrap();
    assert_eq!(person.age, 30);
    assert!(parser.is_exhausted());
}

#[test]
fn record_list_round_trip_shape() {
    let mut parser = TokenParser::new([
        Token::ArrayBegin(Some(2)),
        Token::MapBegin(Some(1)),
        Token::String("name".into()),
        Token::String("a".into()),
        Token::MapEnd,
        Token::Nil,
        Token::ArrayEnd,
    ]);
    let mut d = Decoder::new(&mut parser);
    let people: Vec<Person> = d.decode_owned().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].name, "a");
    assert_eq!(people[1], Person::default());
}
