use std::collections::hash_map::Entry;

use arcstr::ArcStr;
use rustc_hash::FxHashMap;
use sugar_path::SugarPath;

use splitpack_common::{BuildDiagnostic, BuildStage};
use splitpack_error::BuildResult;

use super::GenerateStage;

fn naming_error(reason: String) -> anyhow::Error {
  BuildDiagnostic::Configuration { stage: BuildStage::Naming, reason }.into()
}

impl GenerateStage<'_> {
  /// Renders the filename templates of every chunk. Each emitted file must be claimed by
  /// exactly one chunk and stay inside the output directory.
  pub fn generate_chunk_filenames(&mut self) -> BuildResult<()> {
    let chunk_graph = &mut self.plan_output.chunk_graph;
    let mut claimed_by: FxHashMap<String, ArcStr> = FxHashMap::default();
    let mut errors = vec![];

    for chunk_idx in &chunk_graph.sorted_chunk_idx_vec {
      let chunk = &mut chunk_graph.chunk_table[*chunk_idx];
      let filename = chunk.generate_filenames(self.options).to_string();

      for claimed in std::iter::once(filename).chain(chunk.sourcemap_filename.clone()) {
        if !self.options.dir.join(&claimed).normalize().starts_with(&self.options.dir) {
          errors.push(naming_error(format!(
            "Chunk {:?} would be written to {claimed:?}, outside of the output directory",
            chunk.name
          )));
          continue;
        }
        match claimed_by.entry(claimed) {
          Entry::Occupied(occ) => errors.push(naming_error(format!(
            "Chunks {:?} and {:?} would both be written to {:?}, \
             add [name] to the filename template",
            occ.get(),
            chunk.name,
            occ.key()
          ))),
          Entry::Vacant(vac) => {
            log::debug!("Chunk {:?} -> {}", chunk.name, vac.key());
            vac.insert(chunk.name.clone());
          }
        }
      }
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors.into())
    }
  }
}
