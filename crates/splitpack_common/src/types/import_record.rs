use std::fmt::Debug;

use crate::{ImportKind, ModuleIdx};

/// Byte offset of the import in the transformed module body.
pub type RawImportRecord = ImportRecord<u32>;
pub type ResolvedImportRecord = ImportRecord<ModuleIdx>;

#[derive(Debug, Clone)]
pub struct ImportRecord<State: Debug> {
  pub state: State,
  /// `./lib.js` in `import { foo } from './lib.js';`
  pub specifier: String,
  pub kind: ImportKind,
}

impl RawImportRecord {
  pub fn new(specifier: String, kind: ImportKind, start: u32) -> Self {
    Self { state: start, specifier, kind }
  }

  pub fn into_resolved(self, resolved_module: ModuleIdx) -> ResolvedImportRecord {
    ResolvedImportRecord { state: resolved_module, specifier: self.specifier, kind: self.kind }
  }
}
