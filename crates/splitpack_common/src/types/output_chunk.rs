use arcstr::ArcStr;

use crate::{ChunkKind, RenderedModule};

/// The build artifact of a chunk: where it is written and what it contains.
#[derive(Debug, Clone)]
pub struct OutputChunk {
  pub name: ArcStr,
  pub kind: ChunkKind,
  /// Relative to the output directory.
  pub filename: String,
  pub sourcemap_filename: Option<String>,
  /// `publicPath` + `filename`.
  pub url: String,
  /// In execution order.
  pub modules: Vec<RenderedModule>,
}

impl OutputChunk {
  pub fn contains(&self, stable_id: &str) -> bool {
    self.modules.iter().any(|module| module.stable_id == stable_id)
  }
}
