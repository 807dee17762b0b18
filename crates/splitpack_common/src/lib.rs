mod bundler_options;
mod chunk;
mod module;
mod module_loader;
mod types;

pub use bundler_options::{
  filename_template::FilenameTemplate,
  input_item::InputItem,
  mode::{Mode, SourceMapKind},
  normalized_bundler_options::NormalizedBundlerOptions,
  output_options::OutputOptions,
  resolve_options::{AliasItem, NormalizedResolveOptions, ResolveOptions},
  split_chunks::{SplitChunksOptions, VendorChunkOptions},
  transform_rule::{LoaderOptions, RawTransformRule, TransformRule, TransformStep},
  BundlerOptions,
};

pub use crate::{
  chunk::Chunk,
  module::{AppliedTransform, Module},
  module_loader::{task_result::NormalModuleTaskResult, ModuleLoaderMsg},
  types::{
    chunk_kind::ChunkKind,
    entry_point::EntryPoint,
    import_kind::ImportKind,
    import_record::{ImportRecord, RawImportRecord, ResolvedImportRecord},
    module_id::ModuleId,
    output_asset::{OutputAsset, OutputAssetKind},
    output_chunk::OutputChunk,
    raw_idx::{ChunkIdx, ModuleIdx},
    rendered_module::RenderedModule,
    resolved_id::ResolvedId,
  },
};

pub use splitpack_error::{BuildDiagnostic, BuildStage};
