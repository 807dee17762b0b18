use std::sync::Arc;

use splitpack_common::{BuildStage, BundlerOptions, NormalizedBundlerOptions};
use splitpack_error::BuildResult;
use splitpack_fs::OsFileSystem;
use splitpack_resolver::Resolver;

use crate::{
  generate_stage::GenerateStage,
  plan_stage::PlanStage,
  scan_stage::ScanStage,
  transform::cache::TransformCache,
  types::{bundle_output::BundleOutput, SharedOptions, SharedResolver, SharedTransformCache},
  utils::{emit_assets::emit_assets, normalize_options::normalize_options},
};

pub struct Bundler {
  pub(crate) fs: OsFileSystem,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
  pub(crate) transform_cache: SharedTransformCache,
  stage: BuildStage,
}

impl Bundler {
  /// Validates `options`. Invalid configuration fails here, before any file is touched.
  pub fn new(options: BundlerOptions) -> BuildResult<Self> {
    let options = normalize_options(options)?;

    let fs = OsFileSystem;
    let resolver = Arc::new(Resolver::new(&options.resolve, options.cwd.clone()));
    let transform_cache = Arc::new(TransformCache::new(fs, options.cache_dir.clone()));

    Ok(Self {
      fs,
      options: Arc::new(options),
      resolver,
      transform_cache,
      stage: BuildStage::Configured,
    })
  }

  /// Builds and writes every artifact to the output directory. Nothing is written unless
  /// the whole build succeeded.
  pub async fn write(&mut self) -> BuildResult<BundleOutput> {
    let output = self.build().await?;
    emit_assets(&self.fs, &self.options.dir, &output.assets)?;
    self.stage = BuildStage::Emitted;
    Ok(output)
  }

  /// Builds every artifact without writing them.
  pub async fn generate(&mut self) -> BuildResult<BundleOutput> {
    let output = self.build().await?;
    self.stage = BuildStage::Emitted;
    Ok(output)
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  /// Kept across builds, so a repeated build only re-runs transforms of changed files.
  pub fn transform_cache(&self) -> &TransformCache {
    &self.transform_cache
  }

  /// Where the last build stopped: `Emitted` after a success, the failing stage otherwise.
  pub fn stage(&self) -> BuildStage {
    self.stage
  }

  fn enter(&mut self, stage: BuildStage) {
    debug_assert!(self.stage.next() == Some(stage), "{} -> {stage}", self.stage);
    log::debug!("Build stage: {} -> {stage}", self.stage);
    self.stage = stage;
  }

  async fn build(&mut self) -> BuildResult<BundleOutput> {
    self.stage = BuildStage::Configured;

    let scan_stage = ScanStage::new(
      self.fs,
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.transform_cache),
    );

    self.enter(BuildStage::Resolving);
    let entries = scan_stage.resolve_entries()?;

    self.enter(BuildStage::Transforming);
    let scan_stage_output = scan_stage.scan(entries).await?;

    self.enter(BuildStage::Planning);
    let mut plan_stage_output = PlanStage::new(scan_stage_output, &self.options).plan();

    self.enter(BuildStage::Naming);
    let mut generate_stage = GenerateStage::new(&mut plan_stage_output, &self.options);
    generate_stage.generate_chunk_filenames()?;
    Ok(generate_stage.render_chunk_to_assets())
  }
}
