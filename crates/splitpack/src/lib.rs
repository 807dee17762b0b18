mod bundler;
mod generate_stage;
mod graph;
mod plan_stage;
mod scan_stage;
mod transform;
mod types;
mod utils;

pub use crate::{
  bundler::Bundler,
  transform::{cache::TransformCache, TransformDispatcher, TransformOutput},
  types::bundle_output::BundleOutput,
};
pub use splitpack_common::*;
pub use splitpack_error::{BuildError, BuildResult};
