use splitpack_common::{
  Chunk, ChunkKind, EntryPoint, Module, NormalizedBundlerOptions, OutputAsset, OutputChunk,
  RenderedModule, SourceMapKind,
};
use splitpack_sourcemap::{SourceJoiner, SourceMap, SourceMapSource};
use splitpack_utils::{
  path_ext::PathExt,
  rayon::{IntoParallelRefIterator, ParallelIterator},
};

use crate::types::{bundle_output::BundleOutput, IndexModules};

use super::GenerateStage;

/// Module registry shared by every bundle of a page, defined by whichever loads first.
const RUNTIME: &str = include_str!("./runtime/index.js");

fn quote(value: &str) -> String {
  serde_json::Value::from(value).to_string()
}

impl GenerateStage<'_> {
  /// One bundle per chunk, plus its `.map` file when source maps are external. Chunks are
  /// rendered in parallel and returned in chunk order.
  ///
  /// A bundle starts with the registry runtime and defines each of its modules as a factory
  /// keyed by stable id. Entry bundles then require their entry modules, so the vendor bundle
  /// has to be loaded before them.
  pub fn render_chunk_to_assets(&mut self) -> BundleOutput {
    let chunk_graph = &self.plan_output.chunk_graph;
    let module_table = &self.plan_output.module_table;
    let entry_points = &self.plan_output.entry_points;
    let options = self.options;

    let rendered = chunk_graph
      .sorted_chunk_idx_vec
      .par_iter()
      .map(|chunk_idx| {
        let chunk = &chunk_graph.chunk_table[*chunk_idx];
        render_chunk(chunk, module_table, entry_points, options)
      })
      .collect::<Vec<_>>();

    let warnings = std::mem::take(&mut self.plan_output.warnings);
    let mut output = BundleOutput { warnings, ..Default::default() };
    for (chunk, assets) in rendered {
      output.chunks.push(chunk);
      output.assets.extend(assets);
    }
    output
  }
}

fn render_chunk(
  chunk: &Chunk,
  module_table: &IndexModules,
  entry_points: &[EntryPoint],
  options: &NormalizedBundlerOptions,
) -> (OutputChunk, Vec<OutputAsset>) {
  let filename =
    chunk.filename.clone().expect("Chunk filenames should be generated before rendering");

  let mut joiner = SourceJoiner::default();
  joiner.append_source(RUNTIME.trim_end());
  let mut modules = Vec::with_capacity(chunk.modules.len());
  for module_idx in &chunk.modules {
    let module = &module_table[*module_idx];
    let mut factory = format!(
      "__splitpack__.define({}, function (module, exports, require) {{",
      quote(&module.stable_id)
    );
    if !module.prologue.is_empty() {
      factory.push(' ');
      factory.push_str(&module.prologue);
    }
    joiner.append_source(factory);
    if matches!(options.sourcemap, SourceMapKind::None) {
      joiner.append_source(module.code.as_str());
    } else {
      joiner.append_source(module_source(module));
    }
    joiner.append_source("});");
    let mut importers =
      module.importers.iter().map(|idx| &module_table[*idx]).collect::<Vec<_>>();
    importers.sort_by_key(|importer| importer.exec_order);
    modules.push(RenderedModule {
      stable_id: module.stable_id.clone(),
      pipeline: module.transform.as_ref().map(|applied| applied.pipeline.clone()),
      exec_order: module.exec_order,
      importers: importers.into_iter().map(|importer| importer.stable_id.clone()).collect(),
    });
  }

  if let ChunkKind::EntryPoint { entry_index } = chunk.kind {
    for module_idx in &entry_points[entry_index].modules {
      let stable_id = &module_table[*module_idx].stable_id;
      joiner.append_source(format!("__splitpack__.require({});", quote(stable_id)));
    }
  }

  let (mut content, map) = joiner.join();
  let mut sourcemap_filename = None;
  let mut map_asset = None;

  match (options.sourcemap, map) {
    (SourceMapKind::External, Some(map)) => {
      let map_filename = chunk
        .sourcemap_filename
        .clone()
        .expect("External source maps should have a filename before rendering");
      let chunk_path = options.dir.join(&filename);
      let url = options
        .dir
        .join(&map_filename)
        .relative_to_slash(chunk_path.parent().unwrap_or(options.dir.as_path()));
      content.push_str("\n//# sourceMappingURL=");
      content.push_str(&url);
      content.push('\n');
      map_asset = Some(OutputAsset::source_map(map_filename.clone(), map.to_json_string()));
      sourcemap_filename = Some(map_filename);
    }
    (SourceMapKind::Inline, Some(map)) => {
      content.push_str("\n//# sourceMappingURL=");
      content.push_str(&map.to_data_url());
      content.push('\n');
    }
    _ => content.push('\n'),
  }

  let output_chunk = OutputChunk {
    name: chunk.name.clone(),
    kind: chunk.kind,
    url: options.public_url(&filename),
    filename: filename.clone(),
    sourcemap_filename,
    modules,
  };
  let assets = std::iter::once(OutputAsset::bundle(filename, content)).chain(map_asset).collect();
  (output_chunk, assets)
}

/// Uses the map produced by the transform when there is one, otherwise maps every line of
/// the body onto itself.
fn module_source(module: &Module) -> SourceMapSource {
  let map = module.map.as_deref().and_then(|json| {
    SourceMap::from_json_string(json)
      .map_err(|err| log::warn!("Dropping invalid source map of {}: {err:?}", module.stable_id))
      .ok()
  });
  match map {
    Some(map) => SourceMapSource::new(module.code.clone(), map),
    None => SourceMapSource::with_line_map(&module.stable_id, module.code.clone()),
  }
}
