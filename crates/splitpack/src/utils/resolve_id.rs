use std::path::Path;

use splitpack_common::{BuildDiagnostic, ResolvedId};
use splitpack_error::{BuildResult, BuildStage};
use splitpack_resolver::{ResolveFailure, Resolver};

/// Resolves `request` from `dir`. `importer` is the project relative id of the importing
/// module, `None` for entries. A failure is reported as happening in `stage`.
pub fn resolve_id(
  resolver: &Resolver,
  stage: BuildStage,
  dir: &Path,
  request: &str,
  importer: Option<&str>,
) -> BuildResult<ResolvedId> {
  match resolver.resolve(dir, request) {
    Ok(resolved) => {
      if resolved.via_alias {
        log::debug!("{request:?} is aliased to {}", resolved.path);
      }
      Ok(ResolvedId { id: resolved.path })
    }
    Err(ResolveFailure { searched, reason }) => Err(BuildDiagnostic::Resolution {
      stage,
      specifier: request.to_string(),
      importer: importer.map(ToString::to_string),
      searched,
      reason,
    })?,
  }
}
