//! Decode implementations for keyed collections.
//!
//! Key order on the wire is not significant; duplicate keys overwrite with
//! the last value seen.

use crate::{Decode, Decoder, Error, Kind};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

impl<K: Decode + Eq + Hash, V: Decode> Decode for HashMap<K, V> {
    fn empty() -> Self {
        HashMap::new()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let mut out = HashMap::new();
        d.map_from_kind(kind, |d| {
            let mut key = K::empty();
            let mut value = V::empty();
            K::decode_into(d, &mut key)?;
            d.decode_map_value()?;
            V::decode_into(d, &mut value)?;
            out.insert(key, value);
            Ok(())
        })?;
        *slot = if kind == Kind::Nil { HashMap::new() } else { out };
        Ok(kind)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn empty() -> Self {
        BTreeMap::new()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let mut out = BTreeMap::new();
        d.map_from_kind(kind, |d| {
            let mut key = K::empty();
            let mut value = V::empty();
            K::decode_into(d, &mut key)?;
            d.decode_map_value()?;
            V::decode_into(d, &mut value)?;
            out.insert(key, value);
            Ok(())
        })?;
        *slot = if kind == Kind::Nil {
            BTreeMap::new()
        } else {
            out
        };
        Ok(kind)
    }
}
