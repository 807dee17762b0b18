use std::path::PathBuf;

use crate::{
  FilenameTemplate, InputItem, Mode, NormalizedResolveOptions, SourceMapKind, TransformRule,
  VendorChunkOptions,
};

/// The validated, immutable configuration of a build. Created once and shared by
/// reference with every stage.
#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
  pub context: PathBuf,
  pub mode: Mode,

  // --- Output
  pub dir: PathBuf,
  pub public_path: String,
  pub entry_filenames: FilenameTemplate,
  pub chunk_filenames: FilenameTemplate,
  pub sourcemap_filenames: FilenameTemplate,
  pub sourcemap: SourceMapKind,

  // --- Resolve
  pub resolve: NormalizedResolveOptions,

  // --- Transform
  pub rules: Vec<TransformRule>,
  pub cache_dir: Option<PathBuf>,

  // --- Chunks
  pub vendor: VendorChunkOptions,
}

impl NormalizedBundlerOptions {
  /// First rule, in declaration order, that applies to `path`.
  pub fn rule_for(&self, path: &str) -> Option<&TransformRule> {
    self.rules.iter().find(|rule| rule.matches(path))
  }

  /// `public_path` joined with an emitted filename.
  pub fn public_url(&self, filename: &str) -> String {
    if self.public_path.is_empty() || self.public_path.ends_with('/') {
      format!("{}{filename}", self.public_path)
    } else {
      format!("{}/{filename}", self.public_path)
    }
  }
}
