pub mod module_loader;

mod module_task;
mod task_context;

use module_loader::{ModuleLoader, ModuleLoaderOutput};

use std::sync::Arc;

use arcstr::ArcStr;
use splitpack_common::ResolvedId;
use splitpack_error::{BuildResult, BuildStage};
use splitpack_fs::OsFileSystem;

use crate::{
  types::{SharedOptions, SharedResolver, SharedTransformCache},
  utils::resolve_id::resolve_id,
};

pub type ScanStageOutput = ModuleLoaderOutput;

/// Entry name -> resolved files, in declaration order.
pub type ResolvedEntries = Vec<(ArcStr, Vec<ResolvedId>)>;

pub struct ScanStage {
  fs: OsFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  transform_cache: SharedTransformCache,
}

impl ScanStage {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    transform_cache: SharedTransformCache,
  ) -> Self {
    Self { fs, options, resolver, transform_cache }
  }

  /// Resolves every entry file from the context directory. All failures are reported
  /// together.
  pub fn resolve_entries(&self) -> BuildResult<ResolvedEntries> {
    let mut errors = vec![];
    let mut user_defined_entries = Vec::with_capacity(self.options.input.len());

    for input_item in &self.options.input {
      let mut resolved_ids = Vec::with_capacity(input_item.import.len());
      for import in &input_item.import {
        let context = &self.options.context;
        match resolve_id(&self.resolver, BuildStage::Resolving, context, import, None) {
          Ok(resolved_id) => resolved_ids.push(resolved_id),
          Err(err) => errors.extend(err.0),
        }
      }
      user_defined_entries.push((ArcStr::from(input_item.name.as_str()), resolved_ids));
    }

    if !errors.is_empty() {
      return Err(errors.into());
    }
    Ok(user_defined_entries)
  }

  /// Builds the module graph reachable from the entries.
  pub async fn scan(&self, user_defined_entries: ResolvedEntries) -> BuildResult<ScanStageOutput> {
    let module_loader = ModuleLoader::new(
      self.fs,
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.transform_cache),
    );
    module_loader.fetch_all_modules(user_defined_entries).await
  }
}
