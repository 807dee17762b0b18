use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOptions {
  pub path: Option<String>,
  pub public_path: Option<String>,
  pub filename: Option<String>,
  pub chunk_filename: Option<String>,
  pub source_map_filename: Option<String>,
}
