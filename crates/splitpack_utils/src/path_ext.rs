use std::path::Path;

use sugar_path::SugarPath;

pub trait PathExt {
  fn expect_to_str(&self) -> &str;

  /// Path relative to `base`, slash separated. Falls back to the full path when it isn't
  /// under `base`'s root at all.
  fn relative_to_slash(&self, base: &Path) -> String;
}

impl PathExt for Path {
  fn expect_to_str(&self) -> &str {
    self.to_str().unwrap_or_else(|| {
      panic!("Failed to convert {:?} to valid utf8 str", self.display());
    })
  }

  fn relative_to_slash(&self, base: &Path) -> String {
    if self.is_absolute() {
      self.relative(base).to_slash_lossy().into_owned()
    } else {
      self.to_slash_lossy().into_owned()
    }
  }
}

#[test]
fn test_relative_to_slash() {
  let cwd = Path::new("/project");
  assert_eq!(Path::new("/project/src/index.js").relative_to_slash(cwd), "src/index.js");
  assert_eq!(Path::new("/other/a.js").relative_to_slash(cwd), "../other/a.js");
  assert_eq!(Path::new("src/b.js").relative_to_slash(cwd), "src/b.js");
}
