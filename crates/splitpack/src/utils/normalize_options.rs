use std::path::PathBuf;

use arcstr::ArcStr;
use regex::Regex;
use rustc_hash::FxHashSet;
use sugar_path::SugarPath;

use splitpack_common::{
  AliasItem, BuildDiagnostic, BuildStage, BundlerOptions, FilenameTemplate, InputItem,
  NormalizedBundlerOptions, NormalizedResolveOptions, RawTransformRule, ResolveOptions,
  TransformRule, TransformStep, VendorChunkOptions,
};
use splitpack_ecmascript::EcmaCompiler;
use splitpack_error::BuildResult;

fn config_error(reason: impl Into<String>) -> anyhow::Error {
  BuildDiagnostic::configuration(reason).into()
}

fn compile_regex(pattern: &str, field: &str, errors: &mut Vec<anyhow::Error>) -> Option<Regex> {
  Regex::new(pattern)
    .map_err(|err| errors.push(config_error(format!("Invalid regex in `{field}`: {err}"))))
    .ok()
}

/// Validates the user configuration and fills in defaults. Every problem found is reported,
/// not just the first one.
pub fn normalize_options(raw_options: BundlerOptions) -> BuildResult<NormalizedBundlerOptions> {
  let mut errors = vec![];

  let cwd = match raw_options.cwd {
    Some(cwd) if cwd.is_absolute() => cwd.normalize(),
    Some(cwd) => current_dir()?.join(cwd).normalize(),
    None => current_dir()?,
  };
  let context =
    raw_options.context.map_or_else(|| cwd.clone(), |context| cwd.join(context).normalize());

  let split_chunks = raw_options.split_chunks.unwrap_or_default();
  let vendor_name =
    split_chunks.name.unwrap_or_else(|| VendorChunkOptions::DEFAULT_NAME.to_string());
  if vendor_name.is_empty() {
    errors.push(config_error("`splitChunks.name` must not be empty"));
  }
  let vendor_test = compile_regex(
    split_chunks.test.as_deref().unwrap_or(VendorChunkOptions::DEFAULT_TEST),
    "splitChunks.test",
    &mut errors,
  );

  let input = raw_options.input.unwrap_or_default();
  validate_input(&input, &vendor_name, &mut errors);

  let mode = raw_options.mode.unwrap_or_default();
  let output = raw_options.output.unwrap_or_default();
  let entry_filenames = template(output.filename, "[name].js", "output.filename", &mut errors);
  let chunk_filenames =
    template(output.chunk_filename, "[name].js", "output.chunkFilename", &mut errors);
  let sourcemap_filenames =
    template(output.source_map_filename, "[file].map", "output.sourceMapFilename", &mut errors);

  let resolve = normalize_resolve(raw_options.resolve.unwrap_or_default(), &mut errors);

  let rules = raw_options
    .rules
    .unwrap_or_default()
    .into_iter()
    .enumerate()
    .filter_map(|(index, rule)| normalize_rule(index, rule, &mut errors))
    .collect::<Vec<_>>();

  let Some(vendor_test) = vendor_test.filter(|_| errors.is_empty()) else {
    return Err(errors.into());
  };

  Ok(NormalizedBundlerOptions {
    input,
    context,
    mode,
    dir: cwd.join(output.path.as_deref().unwrap_or("dist")).normalize(),
    public_path: output.public_path.unwrap_or_else(|| "/".to_string()),
    entry_filenames,
    chunk_filenames,
    sourcemap_filenames,
    sourcemap: raw_options.devtool.unwrap_or_else(|| mode.default_sourcemap_kind()),
    resolve,
    rules,
    cache_dir: raw_options.cache_dir.map(|dir| cwd.join(dir).normalize()),
    vendor: VendorChunkOptions { test: vendor_test, name: ArcStr::from(vendor_name) },
    cwd,
  })
}

fn current_dir() -> BuildResult<PathBuf> {
  std::env::current_dir().map_err(|source| {
    BuildDiagnostic::Io { stage: BuildStage::Configured, path: PathBuf::from("."), source }.into()
  })
}

fn template(
  value: Option<String>,
  default: &str,
  field: &str,
  errors: &mut Vec<anyhow::Error>,
) -> FilenameTemplate {
  let value = value.unwrap_or_else(|| default.to_string());
  if value.trim().is_empty() {
    errors.push(config_error(format!("`{field}` must not be empty")));
  }
  FilenameTemplate::new(value)
}

fn validate_input(input: &[InputItem], vendor_name: &str, errors: &mut Vec<anyhow::Error>) {
  if input.is_empty() {
    errors.push(config_error("No entry declared, `entry` needs at least one entry point"));
    return;
  }

  let mut seen = FxHashSet::default();
  for item in input {
    if item.name.is_empty() {
      errors.push(config_error("Entry names must not be empty"));
    } else if !seen.insert(item.name.as_str()) {
      errors.push(config_error(format!("Duplicate entry name {:?}", item.name)));
    }
    if item.name == vendor_name {
      errors.push(config_error(format!(
        "Entry {:?} has the same name as the vendor chunk, rename one of them",
        item.name
      )));
    }
    if item.import.is_empty() || item.import.iter().any(String::is_empty) {
      errors.push(config_error(format!("Entry {:?} must list non-empty file paths", item.name)));
    }
  }
}

fn normalize_resolve(
  raw: ResolveOptions,
  errors: &mut Vec<anyhow::Error>,
) -> NormalizedResolveOptions {
  let defaults = NormalizedResolveOptions::default();

  let extensions = raw.extensions.unwrap_or(defaults.extensions);
  for extension in &extensions {
    if !extension.starts_with('.') {
      errors.push(config_error(format!(
        "Resolve extension {extension:?} must start with a dot"
      )));
    }
  }

  let modules = raw.modules.unwrap_or(defaults.modules);
  if modules.iter().any(String::is_empty) {
    errors.push(config_error("`resolve.modules` must not contain empty paths"));
  }

  let alias = raw
    .alias
    .unwrap_or_default()
    .into_iter()
    .map(|(key, replacement)| (key.clone(), AliasItem::new(&key, replacement)))
    .collect::<Vec<_>>();

  for (index, (key, item)) in alias.iter().enumerate() {
    if item.find.is_empty() || item.replacement.is_empty() {
      errors.push(config_error(format!("Alias {key:?} needs a name and a replacement")));
    }
    // `x` and `x$` both claim the specifier `x`, as do repeated keys.
    if let Some((other, _)) = alias[..index].iter().find(|(_, other)| other.find == item.find) {
      errors.push(config_error(format!(
        "Ambiguous alias: {other:?} and {key:?} both match {:?}",
        item.find
      )));
    }
  }

  NormalizedResolveOptions {
    extensions,
    modules,
    alias: alias.into_iter().map(|(_, item)| item).collect(),
  }
}

fn normalize_rule(
  index: usize,
  raw: RawTransformRule,
  errors: &mut Vec<anyhow::Error>,
) -> Option<TransformRule> {
  let test = compile_regex(&raw.test, &format!("rules[{index}].test"), errors);
  let exclude = match raw.exclude.as_deref() {
    Some(exclude) => Some(compile_regex(exclude, &format!("rules[{index}].exclude"), errors)?),
    None => None,
  };

  if raw.steps.is_empty() {
    errors.push(config_error(format!("`rules[{index}].use` must list at least one step")));
    return None;
  }

  let options = raw.options.unwrap_or_default();
  let target = options.target.unwrap_or_else(|| TransformRule::DEFAULT_TARGET.to_string());
  if raw.steps.contains(&TransformStep::Script) {
    if let Err(reason) = EcmaCompiler::validate_target(&target) {
      errors.push(config_error(format!("`rules[{index}].options.target`: {reason}")));
      return None;
    }
  }

  Some(TransformRule {
    index,
    test: test?,
    exclude,
    steps: raw.steps,
    target,
    cache: options.cache.unwrap_or(true),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn normalize(json: &str) -> BuildResult<NormalizedBundlerOptions> {
    let mut options = BundlerOptions::from_json(json).unwrap();
    options.cwd = Some(PathBuf::from("/project"));
    normalize_options(options)
  }

  fn reasons(err: &splitpack_error::BuildError) -> Vec<String> {
    err.iter().map(ToString::to_string).collect()
  }

  #[test]
  fn defaults_are_filled_in() {
    let options = normalize(r#"{ "entry": { "index": "./scripts/index.js" } }"#).unwrap();
    assert_eq!(options.cwd, PathBuf::from("/project"));
    assert_eq!(options.context, PathBuf::from("/project"));
    assert_eq!(options.dir, PathBuf::from("/project/dist"));
    assert_eq!(options.public_path, "/");
    assert_eq!(options.entry_filenames.template(), "[name].js");
    assert_eq!(options.sourcemap_filenames.template(), "[file].map");
    assert_eq!(options.resolve.extensions, vec![".js", ".json"]);
    assert_eq!(options.vendor.name, "vendor");
    assert!(options.vendor.is_vendor("/project/node_modules/jquery/dist/jquery.js"));
    assert!(!options.vendor.is_vendor("/project/src/scripts/index.js"));
    assert!(options.rules.is_empty());
  }

  #[test]
  fn paths_are_relative_to_the_project_root() {
    let options = normalize(
      r#"{
        "mode": "production",
        "context": "./src",
        "entry": { "index": "./scripts/index.js" },
        "output": { "path": "./dist/js" },
        "cacheDir": "./node_modules/.cache/splitpack"
      }"#,
    )
    .unwrap();
    assert_eq!(options.context, PathBuf::from("/project/src"));
    assert_eq!(options.dir, PathBuf::from("/project/dist/js"));
    assert_eq!(options.cache_dir, Some(PathBuf::from("/project/node_modules/.cache/splitpack")));
    assert!(options.sourcemap.is_external());
  }

  #[test]
  fn configuration_errors_are_all_reported() {
    let err = normalize(
      r#"{
        "entry": { "index": "./a.js", "index": "./b.js", "vendor": "./c.js" },
        "resolve": { "alias": { "modernizr$": "./.modernizrrc", "modernizr": "./other" } },
        "rules": [{ "test": "(", "use": ["script"] }, { "test": "x", "use": [] }]
      }"#,
    )
    .unwrap_err();

    assert!(err.diagnostics().all(BuildDiagnostic::is_configuration));
    let reasons = reasons(&err);
    assert_eq!(reasons.len(), 5, "{reasons:#?}");
    assert!(reasons.iter().any(|r| r.contains("Duplicate entry name \"index\"")));
    assert!(reasons.iter().any(|r| r.contains("same name as the vendor chunk")));
    assert!(reasons.iter().any(|r| r.contains("Ambiguous alias")));
    assert!(reasons.iter().any(|r| r.contains("rules[0].test")));
    assert!(reasons.iter().any(|r| r.contains("rules[1].use")));
  }

  #[test]
  fn missing_entries_are_rejected() {
    let err = normalize("{}").unwrap_err();
    assert!(reasons(&err)[0].contains("No entry declared"));
  }

  #[test]
  fn unknown_script_targets_are_rejected() {
    let err = normalize(
      r#"{
        "entry": { "index": "./a.js" },
        "rules": [{ "test": "\\.js$", "use": ["script"], "options": { "target": "es1999" } }]
      }"#,
    )
    .unwrap_err();
    assert!(reasons(&err)[0].contains("rules[0].options.target"));
  }
}
