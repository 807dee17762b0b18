use serde::{Deserialize, Deserializer};

use super::ordered_entries::OrderedEntries;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolveOptions {
  /// Tried in order when a specifier leaves its extension off.
  pub extensions: Option<Vec<String>>,
  /// Roots searched in order for bare specifiers. A plain directory name such as
  /// `node_modules` is looked up in every ancestor of the importer, anything else is a
  /// directory relative to the project root.
  pub modules: Option<Vec<String>>,
  /// `find` -> `replacement`. A `find` ending with `$` only matches the exact specifier.
  #[serde(default, deserialize_with = "deserialize_alias")]
  pub alias: Option<Vec<(String, String)>>,
}

fn deserialize_alias<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<Vec<(String, String)>>, D::Error> {
  OrderedEntries::<String>::deserialize(deserializer).map(|OrderedEntries(entries)| Some(entries))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasItem {
  pub find: String,
  /// Created from a `find$` key.
  pub exact: bool,
  pub replacement: String,
}

impl AliasItem {
  pub fn new(key: &str, replacement: String) -> Self {
    match key.strip_suffix('$') {
      Some(find) => Self { find: find.to_string(), exact: true, replacement },
      None => Self { find: key.to_string(), exact: false, replacement },
    }
  }

  /// The rewritten specifier, if this alias applies to `specifier`.
  pub fn apply(&self, specifier: &str) -> Option<String> {
    if specifier == self.find {
      return Some(self.replacement.clone());
    }
    if self.exact {
      return None;
    }
    specifier
      .strip_prefix(self.find.as_str())
      .and_then(|rest| rest.strip_prefix('/'))
      .map(|rest| format!("{}/{rest}", self.replacement.trim_end_matches('/')))
  }
}

#[derive(Debug, Clone)]
pub struct NormalizedResolveOptions {
  pub extensions: Vec<String>,
  pub modules: Vec<String>,
  pub alias: Vec<AliasItem>,
}

impl Default for NormalizedResolveOptions {
  fn default() -> Self {
    Self {
      extensions: vec![".js".to_string(), ".json".to_string()],
      modules: vec!["node_modules".to_string()],
      alias: vec![],
    }
  }
}

#[test]
fn exact_alias_only_matches_the_whole_specifier() {
  let alias = AliasItem::new("modernizr$", "/project/.modernizrrc".to_string());
  assert!(alias.exact);
  assert_eq!(alias.apply("modernizr").as_deref(), Some("/project/.modernizrrc"));
  assert_eq!(alias.apply("modernizr/lib/build"), None);
  assert_eq!(alias.apply("modernizr-extra"), None);
}

#[test]
fn prefix_alias_matches_sub_paths() {
  let alias = AliasItem::new("utils", "./src/utils/".to_string());
  assert!(!alias.exact);
  assert_eq!(alias.apply("utils").as_deref(), Some("./src/utils/"));
  assert_eq!(alias.apply("utils/dom").as_deref(), Some("./src/utils/dom"));
  assert_eq!(alias.apply("utilsx"), None);
}
