use splitpack_common::{OutputAsset, OutputChunk};

#[derive(Debug, Default)]
pub struct BundleOutput {
  /// Bundles and external source maps, relative to the output directory.
  pub assets: Vec<OutputAsset>,
  /// One artifact per chunk: entry chunks in declaration order, then the vendor chunk.
  pub chunks: Vec<OutputChunk>,
  pub warnings: Vec<anyhow::Error>,
}

impl BundleOutput {
  pub fn chunk(&self, name: &str) -> Option<&OutputChunk> {
    self.chunks.iter().find(|chunk| chunk.name == name)
  }

  pub fn asset(&self, filename: &str) -> Option<&str> {
    self.assets.iter().find(|asset| asset.filename == filename).map(|asset| asset.content.as_str())
  }
}
