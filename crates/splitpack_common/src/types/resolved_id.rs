use std::path::Path;

use arcstr::ArcStr;
use splitpack_utils::path_ext::PathExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
  /// Absolute path of the resolved file.
  pub id: ArcStr,
}

impl ResolvedId {
  pub fn debug_id(&self, cwd: impl AsRef<Path>) -> String {
    Path::new(self.id.as_str()).relative_to_slash(cwd.as_ref())
  }
}
