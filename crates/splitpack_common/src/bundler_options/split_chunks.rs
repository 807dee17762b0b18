use arcstr::ArcStr;
use regex::Regex;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SplitChunksOptions {
  /// Regex over the resolved module path.
  pub test: Option<String>,
  pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VendorChunkOptions {
  pub test: Regex,
  pub name: ArcStr,
}

impl VendorChunkOptions {
  pub const DEFAULT_TEST: &'static str = r"[\\/]node_modules[\\/]";
  pub const DEFAULT_NAME: &'static str = "vendor";

  pub fn is_vendor(&self, path: &str) -> bool {
    self.test.is_match(path)
  }
}
