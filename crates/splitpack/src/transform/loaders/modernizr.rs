use serde::{Deserialize, Serialize};

use super::LoaderOutput;

/// The subset of a Modernizr build config that shapes the emitted module. Other keys of
/// the config format are accepted and ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModernizrConfig {
  #[serde(default)]
  minify: bool,
  #[serde(default)]
  options: Vec<String>,
  #[serde(default, rename = "feature-detects")]
  feature_detects: Vec<String>,
  #[serde(default)]
  class_prefix: String,
  enable_classes: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildDescriptor<'a> {
  options: &'a [String],
  feature_detects: &'a [String],
  class_prefix: &'a str,
  enable_classes: bool,
}

pub fn transform(source: &str) -> Result<LoaderOutput, String> {
  let config = serde_json::from_str::<ModernizrConfig>(source)
    .map_err(|err| format!("Invalid Modernizr config: {err}"))?;

  let descriptor = BuildDescriptor {
    options: &config.options,
    feature_detects: &config.feature_detects,
    class_prefix: &config.class_prefix,
    enable_classes: config.enable_classes.unwrap_or(true),
  };
  let descriptor = if config.minify {
    serde_json::to_string(&descriptor)
  } else {
    serde_json::to_string_pretty(&descriptor)
  }
  .map_err(|err| err.to_string())?;

  Ok(LoaderOutput::code(format!(
    "var Modernizr = {{ build: {descriptor}, tests: {{}} }};\n\
     Modernizr.addTest = function (name, result) {{ Modernizr.tests[name] = !!result; }};\n\
     export default Modernizr;\n"
  )))
}
