pub mod bundle_output;

use std::sync::Arc;

use oxc_index::IndexVec;
use splitpack_common::{Module, ModuleIdx, NormalizedBundlerOptions};
use splitpack_resolver::Resolver;

use crate::transform::cache::TransformCache;

pub type IndexModules = IndexVec<ModuleIdx, Module>;

pub type SharedResolver = Arc<Resolver>;
pub type SharedOptions = Arc<NormalizedBundlerOptions>;
pub type SharedTransformCache = Arc<TransformCache>;
