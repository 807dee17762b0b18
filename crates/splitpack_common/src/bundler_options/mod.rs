pub mod filename_template;
pub mod input_item;
pub mod mode;
pub mod normalized_bundler_options;
pub mod ordered_entries;
pub mod output_options;
pub mod resolve_options;
pub mod split_chunks;
pub mod transform_rule;

use std::path::PathBuf;

use serde::Deserialize;
use splitpack_error::BuildDiagnostic;

use crate::{
  InputItem, Mode, OutputOptions, RawTransformRule, ResolveOptions, SourceMapKind,
  SplitChunksOptions,
};

/// Build configuration as written by the user. Every field is optional, defaults are
/// filled in when the options are normalized.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundlerOptions {
  // --- Input
  #[serde(default, rename = "entry", deserialize_with = "input_item::deserialize_input")]
  pub input: Option<Vec<InputItem>>,
  /// Project root. Relative paths in the configuration are resolved against it.
  pub cwd: Option<PathBuf>,
  /// Directory entry specifiers are resolved from.
  pub context: Option<PathBuf>,
  pub mode: Option<Mode>,

  // --- Output
  pub output: Option<OutputOptions>,
  /// Overrides the source map strategy picked by `mode`.
  pub devtool: Option<SourceMapKind>,

  // --- Resolve
  pub resolve: Option<ResolveOptions>,

  // --- Transform
  pub rules: Option<Vec<RawTransformRule>>,
  pub cache_dir: Option<PathBuf>,

  // --- Chunks
  pub split_chunks: Option<SplitChunksOptions>,
}

impl BundlerOptions {
  pub fn from_json(json: &str) -> Result<Self, BuildDiagnostic> {
    serde_json::from_str(json)
      .map_err(|err| BuildDiagnostic::configuration(format!("Invalid configuration: {err}")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::TransformStep;

  #[test]
  fn parse_full_configuration() {
    let options = BundlerOptions::from_json(
      r#"{
        "mode": "production",
        "context": "./src",
        "entry": { "index": ["./scripts/index.js"], "admin": "./scripts/admin.js" },
        "output": {
          "path": "./dist/js",
          "publicPath": "/",
          "filename": "[name].js",
          "chunkFilename": "[name].js",
          "sourceMapFilename": "[file].map"
        },
        "resolve": {
          "extensions": [".webpack-loader.js", ".web-loader.js", ".loader.js", ".js"],
          "modules": ["./src", "node_modules"],
          "alias": { "modernizr$": "./.modernizrrc" }
        },
        "splitChunks": { "test": "[\\\\/]node_modules[\\\\/]", "name": "vendor" },
        "rules": [
          { "test": "\\.js?$", "exclude": "node_modules", "use": ["script"], "options": { "target": "es2015" } },
          { "test": "\\.modernizrrc(\\.json)?$", "exclude": "node_modules", "use": ["modernizr"] }
        ]
      }"#,
    )
    .unwrap();

    assert_eq!(options.mode, Some(Mode::Production));
    assert_eq!(
      options.input.unwrap(),
      vec![
        InputItem::new("index", ["./scripts/index.js"]),
        InputItem::new("admin", ["./scripts/admin.js"]),
      ]
    );
    let resolve = options.resolve.unwrap();
    assert_eq!(resolve.alias.unwrap(), vec![("modernizr$".to_string(), "./.modernizrrc".to_string())]);
    let rules = options.rules.unwrap();
    assert_eq!(rules[1].steps, vec![TransformStep::Modernizr]);
    assert_eq!(options.split_chunks.unwrap().name.as_deref(), Some("vendor"));
  }

  #[test]
  fn unknown_keys_are_rejected() {
    let err = BundlerOptions::from_json(r#"{ "entry": {}, "devServer": { "port": 8080 } }"#)
      .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("devServer"));

    let err = BundlerOptions::from_json(r#"{ "output": { "libraryTarget": "umd" } }"#).unwrap_err();
    assert!(err.to_string().contains("libraryTarget"));
  }

  #[test]
  fn duplicate_entry_names_survive_parsing() {
    let options =
      BundlerOptions::from_json(r#"{ "entry": { "index": "./a.js", "index": "./b.js" } }"#).unwrap();
    assert_eq!(options.input.unwrap().len(), 2);
  }
}
