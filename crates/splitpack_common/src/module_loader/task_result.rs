use crate::{Module, RawImportRecord, ResolvedId};

pub struct NormalModuleTaskResult {
  pub module: Module,
  /// Parallel to `raw_import_records`.
  pub resolved_deps: Vec<ResolvedId>,
  pub raw_import_records: Vec<RawImportRecord>,
  pub warnings: Vec<anyhow::Error>,
}
