use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Mode {
  Development,
  Production,
}

impl From<Mode> for splitpack::Mode {
  fn from(value: Mode) -> Self {
    match value {
      Mode::Development => splitpack::Mode::Development,
      Mode::Production => splitpack::Mode::Production,
    }
  }
}
