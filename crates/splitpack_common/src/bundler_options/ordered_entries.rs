use std::{fmt, marker::PhantomData};

use serde::{
  de::{MapAccess, Visitor},
  Deserialize, Deserializer,
};

/// A JSON object read as an ordered list of pairs. Unlike a map, repeated keys survive
/// deserialization so they can be reported instead of silently overwriting each other.
#[derive(Debug)]
pub struct OrderedEntries<V>(pub Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
      type Value = OrderedEntries<V>;

      fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, V>()? {
          entries.push((key, value));
        }
        Ok(OrderedEntries(entries))
      }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
  }
}

#[test]
fn keeps_order_and_repeated_keys() {
  let OrderedEntries(entries) =
    serde_json::from_str::<OrderedEntries<u32>>(r#"{ "b": 1, "a": 2, "b": 3 }"#).unwrap();
  assert_eq!(entries, vec![("b".to_string(), 1), ("a".to_string(), 2), ("b".to_string(), 3)]);
}
