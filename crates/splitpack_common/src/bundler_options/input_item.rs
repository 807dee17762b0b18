use serde::{Deserialize, Deserializer};

use super::ordered_entries::OrderedEntries;

/// One named entry point and the files it starts from, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputItem {
  pub name: String,
  pub import: Vec<String>,
}

impl InputItem {
  pub fn new<I, S>(name: impl Into<String>, import: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self { name: name.into(), import: import.into_iter().map(Into::into).collect() }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryImport {
  Single(String),
  Many(Vec<String>),
}

/// `{ "index": "./a.js", "admin": ["./b.js", "./c.js"] }`
pub(crate) fn deserialize_input<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<Vec<InputItem>>, D::Error> {
  let OrderedEntries(entries) = OrderedEntries::<EntryImport>::deserialize(deserializer)?;
  let items = entries
    .into_iter()
    .map(|(name, import)| match import {
      EntryImport::Single(import) => InputItem { name, import: vec![import] },
      EntryImport::Many(import) => InputItem { name, import },
    })
    .collect();
  Ok(Some(items))
}
