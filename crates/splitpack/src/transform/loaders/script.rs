use std::path::Path;

use splitpack_ecmascript::{EcmaCompiler, TranspileReturn};

use super::LoaderOutput;

pub fn transform(path: &Path, target: &str, source: &str) -> Result<LoaderOutput, String> {
  let TranspileReturn { code, map } = EcmaCompiler::transpile(source, path, target)?;
  Ok(LoaderOutput { code, map })
}
