use clap::ValueEnum;

/// Where source maps go. Overrides the default picked by `--mode`.
#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Devtool {
  External,
  Inline,
  None,
}

impl From<Devtool> for splitpack::SourceMapKind {
  fn from(value: Devtool) -> Self {
    match value {
      Devtool::External => splitpack::SourceMapKind::External,
      Devtool::Inline => splitpack::SourceMapKind::Inline,
      Devtool::None => splitpack::SourceMapKind::None,
    }
  }
}
