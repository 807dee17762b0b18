mod build_stage;
mod diagnostic;

use std::ops::{Deref, DerefMut};

pub use crate::{build_stage::BuildStage, diagnostic::BuildDiagnostic};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Typed diagnostics carried by this error, in the order they were reported.
  pub fn diagnostics(&self) -> impl Iterator<Item = &BuildDiagnostic> {
    self.0.iter().filter_map(|error| error.downcast_ref::<BuildDiagnostic>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<BuildDiagnostic> for BuildError {
  fn from(diagnostic: BuildDiagnostic) -> Self {
    Self(vec![diagnostic.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn diagnostics_are_recovered_from_anyhow() {
  let error = BuildError(vec![
    anyhow::anyhow!("plain message"),
    BuildDiagnostic::Configuration {
      stage: BuildStage::Configured,
      reason: "Duplicate entry name \"index\"".to_string(),
    }
    .into(),
  ]);

  let diagnostics = error.diagnostics().collect::<Vec<_>>();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].stage(), BuildStage::Configured);
  assert!(diagnostics[0].is_configuration());
}
