mod sort_modules;

use splitpack_common::{Chunk, ChunkKind, EntryPoint, NormalizedBundlerOptions};

use crate::{graph::ChunkGraph, scan_stage::ScanStageOutput, types::IndexModules};

#[derive(Debug)]
pub struct PlanStageOutput {
  pub module_table: IndexModules,
  pub entry_points: Vec<EntryPoint>,
  pub chunk_graph: ChunkGraph,
  pub warnings: Vec<anyhow::Error>,
}

/// Partitions the module graph: vendor modules go to the shared vendor chunk, every
/// other module to the chunk of the first entry, in declaration order, that reaches it.
pub struct PlanStage<'a> {
  pub module_table: IndexModules,
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
  pub options: &'a NormalizedBundlerOptions,
}

impl<'a> PlanStage<'a> {
  pub fn new(scan_stage_output: ScanStageOutput, options: &'a NormalizedBundlerOptions) -> Self {
    Self {
      module_table: scan_stage_output.module_table,
      entry_points: scan_stage_output.entry_points,
      warnings: scan_stage_output.warnings,
      options,
    }
  }

  pub fn plan(mut self) -> PlanStageOutput {
    self.sort_modules();
    let chunk_graph = self.split_chunks();

    log::debug!(
      "Planned {} chunk(s) for {} module(s)",
      chunk_graph.chunk_table.len(),
      self.module_table.len()
    );

    PlanStageOutput {
      module_table: self.module_table,
      entry_points: self.entry_points,
      chunk_graph,
      warnings: self.warnings,
    }
  }

  fn split_chunks(&mut self) -> ChunkGraph {
    let mut chunk_graph = ChunkGraph::new(&self.module_table);

    let entry_chunks = self
      .entry_points
      .iter()
      .enumerate()
      .map(|(entry_index, entry)| {
        chunk_graph.add_chunk(Chunk::new(entry.name.clone(), ChunkKind::EntryPoint { entry_index }))
      })
      .collect::<Vec<_>>();

    for (entry, &entry_chunk) in self.entry_points.iter().zip(&entry_chunks) {
      let mut stack = entry.modules.iter().rev().copied().collect::<Vec<_>>();
      while let Some(module_idx) = stack.pop() {
        // Claimed by an earlier entry, and so is everything it imports.
        if chunk_graph.module_to_chunk[module_idx].is_some() {
          continue;
        }

        let module = &self.module_table[module_idx];
        let chunk_idx = if module.is_vendor {
          chunk_graph.ensure_vendor_chunk(&self.options.vendor.name)
        } else {
          entry_chunk
        };
        chunk_graph.add_module_to_chunk(module_idx, chunk_idx);

        let deps_start = stack.len();
        stack.extend(module.dependencies());
        stack[deps_start..].reverse();
      }
    }

    for chunk in chunk_graph.chunk_table.iter_mut() {
      chunk.modules.sort_by_key(|module_idx| self.module_table[*module_idx].exec_order);
      let ChunkKind::EntryPoint { entry_index } = chunk.kind else { continue };
      if !chunk.modules.is_empty() {
        continue;
      }
      let entry = &self.entry_points[entry_index];
      let only_vendor = entry.modules.iter().all(|idx| self.module_table[*idx].is_vendor);
      self.warnings.push(if only_vendor {
        anyhow::anyhow!("Entry {:?} only reaches vendor modules, its bundle is empty.", chunk.name)
      } else {
        anyhow::anyhow!(
          "Entry {:?} has an empty bundle, its modules were claimed by an earlier entry.",
          chunk.name
        )
      });
    }

    chunk_graph.sorted_chunk_idx_vec = entry_chunks;
    chunk_graph.sorted_chunk_idx_vec.extend(chunk_graph.vendor_chunk);
    chunk_graph
  }
}
