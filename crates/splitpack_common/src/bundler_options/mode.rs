use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  #[default]
  Development,
  Production,
}

impl Mode {
  /// Production ships separate `.map` files, development inlines them into the bundle.
  pub fn default_sourcemap_kind(self) -> SourceMapKind {
    match self {
      Self::Development => SourceMapKind::Inline,
      Self::Production => SourceMapKind::External,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapKind {
  /// A companion file named by the source map filename template.
  External,
  /// A base64 data url comment at the end of the bundle.
  Inline,
  None,
}

impl SourceMapKind {
  pub fn is_external(self) -> bool {
    matches!(self, Self::External)
  }
}
