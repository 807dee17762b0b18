use arcstr::ArcStr;
use oxc_index::{index_vec, IndexVec};
use splitpack_common::{Chunk, ChunkIdx, ChunkKind, ModuleIdx};

use crate::types::IndexModules;

#[derive(Debug)]
pub struct ChunkGraph {
  pub chunk_table: IndexVec<ChunkIdx, Chunk>,
  /// Entry chunks in declaration order, then the vendor chunk.
  pub sorted_chunk_idx_vec: Vec<ChunkIdx>,
  pub module_to_chunk: IndexVec<ModuleIdx, Option<ChunkIdx>>,
  pub vendor_chunk: Option<ChunkIdx>,
}

impl ChunkGraph {
  pub fn new(modules: &IndexModules) -> Self {
    Self {
      chunk_table: IndexVec::default(),
      module_to_chunk: index_vec![None; modules.len()],
      sorted_chunk_idx_vec: Vec::new(),
      vendor_chunk: None,
    }
  }

  pub fn add_chunk(&mut self, chunk: Chunk) -> ChunkIdx {
    self.chunk_table.push(chunk)
  }

  /// The vendor chunk is only created once a vendor module shows up.
  pub fn ensure_vendor_chunk(&mut self, name: &ArcStr) -> ChunkIdx {
    match self.vendor_chunk {
      Some(chunk_idx) => chunk_idx,
      None => {
        let chunk_idx = self.add_chunk(Chunk::new(ArcStr::clone(name), ChunkKind::Vendor));
        *self.vendor_chunk.insert(chunk_idx)
      }
    }
  }

  pub fn add_module_to_chunk(&mut self, module_idx: ModuleIdx, chunk_idx: ChunkIdx) {
    self.chunk_table[chunk_idx].modules.push(module_idx);
    self.module_to_chunk[module_idx] = Some(chunk_idx);
  }
}
