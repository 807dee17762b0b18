use splitpack_common::{BuildDiagnostic, BuildStage, ModuleId};
use splitpack_error::BuildResult;
use splitpack_fs::FileSystem;

/// Modules are text. Files that are not valid utf-8 fail the build with the path named.
pub fn load_source(fs: &dyn FileSystem, id: &ModuleId) -> BuildResult<String> {
  fs.read_to_string(id.as_path()).map_err(|source| {
    let path = id.as_path().to_path_buf();
    BuildDiagnostic::Io { stage: BuildStage::Transforming, path, source }.into()
  })
}
