use std::fmt;

use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;

/// A transform rule as written in the configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawTransformRule {
  pub test: String,
  pub exclude: Option<String>,
  #[serde(rename = "use")]
  pub steps: Vec<TransformStep>,
  pub options: Option<LoaderOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformStep {
  /// Syntax downleveling of a script.
  Script,
  /// JSON document -> `export default <json>;`.
  Json,
  /// Modernizr build config -> module exporting the configured build.
  Modernizr,
}

impl TransformStep {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Script => "script",
      Self::Json => "json",
      Self::Modernizr => "modernizr",
    }
  }
}

impl fmt::Display for TransformStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoaderOptions {
  /// Syntax target of the `script` step, e.g. `es2015`.
  pub target: Option<String>,
  /// Set to `false` to always re-run the pipeline.
  pub cache: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct TransformRule {
  /// Position in the configured rule list.
  pub index: usize,
  pub test: Regex,
  pub exclude: Option<Regex>,
  pub steps: Vec<TransformStep>,
  pub target: String,
  pub cache: bool,
}

impl TransformRule {
  pub const DEFAULT_TARGET: &'static str = "es2015";

  pub fn matches(&self, path: &str) -> bool {
    self.test.is_match(path) && !self.exclude.as_ref().is_some_and(|exclude| exclude.is_match(path))
  }

  /// `script`, `json -> modernizr`, ...
  pub fn pipeline(&self) -> String {
    self.steps.iter().join(" -> ")
  }

  /// Everything that can change what this rule produces for a given input.
  pub fn identity(&self) -> String {
    format!(
      "{}|{}|{}|{}|{}",
      self.index,
      self.test.as_str(),
      self.exclude.as_ref().map_or("", Regex::as_str),
      self.pipeline(),
      self.target
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rule(test: &str, exclude: Option<&str>) -> TransformRule {
    TransformRule {
      index: 0,
      test: Regex::new(test).unwrap(),
      exclude: exclude.map(|exclude| Regex::new(exclude).unwrap()),
      steps: vec![TransformStep::Script],
      target: TransformRule::DEFAULT_TARGET.to_string(),
      cache: true,
    }
  }

  #[test]
  fn exclude_wins_over_test() {
    let rule = rule(r"\.js?$", Some("node_modules"));
    assert!(rule.matches("/project/src/scripts/index.js"));
    assert!(!rule.matches("/project/node_modules/jquery/dist/jquery.js"));
    assert!(!rule.matches("/project/.modernizrrc"));
  }

  #[test]
  fn identity_changes_with_target() {
    let a = rule(r"\.js$", None);
    let mut b = a.clone();
    b.target = "es2020".to_string();
    assert_ne!(a.identity(), b.identity());
    assert_eq!(a.identity(), a.clone().identity());
  }

  #[test]
  fn unknown_steps_and_options_are_rejected() {
    let err = serde_json::from_str::<RawTransformRule>(r#"{ "test": "x", "use": ["babel"] }"#);
    assert!(err.is_err());

    let err = serde_json::from_str::<RawTransformRule>(
      r#"{ "test": "x", "use": ["script"], "options": { "cacheDirectory": true } }"#,
    );
    assert!(err.is_err());
  }
}
