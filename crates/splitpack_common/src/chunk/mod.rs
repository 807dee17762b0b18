use arcstr::ArcStr;
use splitpack_utils::sanitize_file_name::sanitize_file_name;

use crate::{ChunkKind, FilenameTemplate, ModuleIdx, NormalizedBundlerOptions};

#[derive(Debug)]
pub struct Chunk {
  pub name: ArcStr,
  pub kind: ChunkKind,
  /// Sorted by execution order once planning finishes.
  pub modules: Vec<ModuleIdx>,
  pub filename: Option<String>,
  pub sourcemap_filename: Option<String>,
}

impl Chunk {
  pub fn new(name: ArcStr, kind: ChunkKind) -> Self {
    Self { name, kind, modules: vec![], filename: None, sourcemap_filename: None }
  }

  pub fn filename_template<'a>(
    &self,
    options: &'a NormalizedBundlerOptions,
  ) -> &'a FilenameTemplate {
    match self.kind {
      ChunkKind::EntryPoint { .. } => &options.entry_filenames,
      ChunkKind::Vendor => &options.chunk_filenames,
    }
  }

  /// Renders the output filename and, for external source maps, the map filename.
  pub fn generate_filenames(&mut self, options: &NormalizedBundlerOptions) -> &str {
    let name = sanitize_file_name(&self.name);
    let filename = self.filename_template(options).render(Some(&name), None);

    self.sourcemap_filename = options
      .sourcemap
      .is_external()
      .then(|| options.sourcemap_filenames.render(Some(&name), Some(&filename)));

    self.filename.insert(filename)
  }
}
