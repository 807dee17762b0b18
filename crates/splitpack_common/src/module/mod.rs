use rustc_hash::FxHashSet;

use crate::{ModuleId, ModuleIdx, ResolvedImportRecord};

/// The transform rule that produced a module's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTransform {
  pub rule_index: usize,
  pub pipeline: String,
  pub from_cache: bool,
}

#[derive(Debug)]
pub struct Module {
  pub idx: ModuleIdx,
  pub id: ModuleId,
  /// Project relative path, e.g. `src/scripts/index.js`.
  pub stable_id: String,
  /// Body after the transform pipeline, or the untouched source.
  pub code: String,
  /// Source map JSON of `code` when a transform produced one.
  pub map: Option<String>,
  /// Statements run at the top of the module's registry factory, before `code`. Holds the
  /// export getters of ES modules and is empty for scripts.
  pub prologue: String,
  pub transform: Option<AppliedTransform>,
  pub import_records: Vec<ResolvedImportRecord>,
  pub importers: Vec<ModuleIdx>,
  /// Lives under the vendor directory and is always emitted into the vendor chunk.
  pub is_vendor: bool,
  pub exec_order: u32,
}

impl Module {
  pub fn set_import_records(&mut self, import_records: Vec<ResolvedImportRecord>) {
    self.import_records = import_records;
  }

  /// Modules this one depends on, in source order, without repeats.
  pub fn dependencies(&self) -> impl Iterator<Item = ModuleIdx> + '_ {
    let mut seen = FxHashSet::default();
    self.import_records.iter().map(|rec| rec.state).filter(move |idx| seen.insert(*idx))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ImportKind, RawImportRecord};

  #[test]
  fn dependencies_keep_the_first_occurrence_of_each_module() {
    let record = |specifier: &str, idx: usize| {
      RawImportRecord::new(specifier.to_string(), ImportKind::Import, 0)
        .into_resolved(ModuleIdx::from_usize(idx))
    };
    let mut module = Module {
      idx: ModuleIdx::from_usize(0),
      id: ModuleId::new("/project/src/index.js"),
      stable_id: "src/index.js".to_string(),
      code: String::new(),
      map: None,
      prologue: String::new(),
      transform: None,
      import_records: vec![],
      importers: vec![],
      is_vendor: false,
      exec_order: u32::MAX,
    };
    module.set_import_records(vec![
      record("./b", 2),
      record("./a", 1),
      record("./b.js", 2),
      record("./c", 3),
      record("./a", 1),
    ]);

    let dependencies = module.dependencies().map(ModuleIdx::index).collect::<Vec<_>>();
    assert_eq!(dependencies, [2, 1, 3]);
  }
}
