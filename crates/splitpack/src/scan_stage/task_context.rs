use splitpack_common::ModuleLoaderMsg;
use splitpack_fs::OsFileSystem;

use crate::types::{SharedOptions, SharedResolver, SharedTransformCache};

/// Used to store common data shared between all tasks.
pub struct TaskContext {
  pub fs: OsFileSystem,
  pub options: SharedOptions,
  pub resolver: SharedResolver,
  pub transform_cache: SharedTransformCache,
  pub tx: tokio::sync::mpsc::Sender<ModuleLoaderMsg>,
}
