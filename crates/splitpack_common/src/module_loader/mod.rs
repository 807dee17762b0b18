pub mod task_result;

use task_result::NormalModuleTaskResult;

/// What a module task reports back to the loader.
pub enum ModuleLoaderMsg {
  NormalModuleDone(NormalModuleTaskResult),
  /// The loader stops scheduling work after the first of these.
  BuildErrors(Vec<anyhow::Error>),
}
