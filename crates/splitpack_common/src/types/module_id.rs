use std::path::Path;

use arcstr::ArcStr;
use splitpack_utils::path_ext::PathExt;

/// `ModuleId` is the absolute path a module resolved to. It identifies the module for
/// the whole build, so two imports reaching the same file share one module.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  pub fn as_path(&self) -> &Path {
    Path::new(self.0.as_str())
  }

  /// Project relative, slash separated form used in bundles, reports and messages.
  pub fn stabilize(&self, cwd: &Path) -> String {
    self.as_path().relative_to_slash(cwd)
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}
