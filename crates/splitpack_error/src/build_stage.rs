use std::fmt;

/// Stages of a single build. A build only ever moves forward through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStage {
  Configured,
  Resolving,
  Transforming,
  Planning,
  Naming,
  Emitted,
}

impl BuildStage {
  pub fn next(self) -> Option<Self> {
    match self {
      Self::Configured => Some(Self::Resolving),
      Self::Resolving => Some(Self::Transforming),
      Self::Transforming => Some(Self::Planning),
      Self::Planning => Some(Self::Naming),
      Self::Naming => Some(Self::Emitted),
      Self::Emitted => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Configured => "configured",
      Self::Resolving => "resolving",
      Self::Transforming => "transforming",
      Self::Planning => "planning",
      Self::Naming => "naming",
      Self::Emitted => "emitted",
    }
  }
}

impl fmt::Display for BuildStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[test]
fn stages_are_linear() {
  let mut stage = BuildStage::Configured;
  let mut visited = vec![stage];
  while let Some(next) = stage.next() {
    assert!(next > stage);
    visited.push(next);
    stage = next;
  }
  assert_eq!(visited.len(), 6);
  assert_eq!(stage, BuildStage::Emitted);
}
