use std::path::PathBuf;

use crate::BuildStage;

fn imported_by(importer: Option<&str>) -> String {
  importer.map(|importer| format!(" (imported by {importer})")).unwrap_or_default()
}

/// Errors that abort a build. Each one names what failed and the stage it failed in.
#[derive(Debug, thiserror::Error)]
pub enum BuildDiagnostic {
  #[error(
    "[{stage}] ResolutionError: Could not resolve {specifier:?}{} - {reason}. Searched: {}",
    imported_by(.importer.as_deref()),
    .searched.join(", ")
  )]
  Resolution {
    /// Entries resolve while `Resolving`, imports while their importer is `Transforming`.
    stage: BuildStage,
    specifier: String,
    importer: Option<String>,
    searched: Vec<String>,
    reason: String,
  },

  #[error("[{stage}] TransformError: {pipeline} failed on {path} - {reason}", stage = BuildStage::Transforming)]
  Transform { path: String, pipeline: String, reason: String },

  #[error("[{stage}] ConfigurationError: {reason}")]
  Configuration { stage: BuildStage, reason: String },

  #[error("[{stage}] Failed to access {}: {source}", .path.display())]
  Io {
    stage: BuildStage,
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl BuildDiagnostic {
  pub fn configuration(reason: impl Into<String>) -> Self {
    Self::Configuration { stage: BuildStage::Configured, reason: reason.into() }
  }

  pub fn stage(&self) -> BuildStage {
    match self {
      Self::Transform { .. } => BuildStage::Transforming,
      Self::Resolution { stage, .. }
      | Self::Configuration { stage, .. }
      | Self::Io { stage, .. } => *stage,
    }
  }

  pub fn is_resolution(&self) -> bool {
    matches!(self, Self::Resolution { .. })
  }

  pub fn is_transform(&self) -> bool {
    matches!(self, Self::Transform { .. })
  }

  pub fn is_configuration(&self) -> bool {
    matches!(self, Self::Configuration { .. })
  }
}

#[test]
fn resolution_message_names_specifier_and_locations() {
  let diagnostic = BuildDiagnostic::Resolution {
    stage: BuildStage::Transforming,
    specifier: "jquery".to_string(),
    importer: Some("scripts/index.js".to_string()),
    searched: vec!["src".to_string(), "node_modules".to_string()],
    reason: "Cannot find module".to_string(),
  };
  assert_eq!(
    diagnostic.to_string(),
    "[transforming] ResolutionError: Could not resolve \"jquery\" (imported by scripts/index.js) - Cannot find module. Searched: src, node_modules"
  );
}
