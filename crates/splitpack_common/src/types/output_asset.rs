#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAssetKind {
  Bundle,
  SourceMap,
}

/// A file to emit, relative to the output directory.
#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub kind: OutputAssetKind,
  pub filename: String,
  pub content: String,
}

impl OutputAsset {
  pub fn bundle(filename: String, content: String) -> Self {
    Self { kind: OutputAssetKind::Bundle, filename, content }
  }

  pub fn source_map(filename: String, content: String) -> Self {
    Self { kind: OutputAssetKind::SourceMap, filename, content }
  }

  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }
}
