use std::path::PathBuf;

use clap::Args;
use splitpack::InputItem;

use crate::types::{devtool::Devtool, mode::Mode};

#[derive(Args)]
pub struct InputArgs {
  /// JSON configuration file. `splitpack.json` is picked up when it exists.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,

  /// Project root, the directory of the configuration file by default.
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  /// `name=path`, replaces the configured entries. Repeating a name appends to that entry.
  #[clap(long, short = 'i', action = clap::ArgAction::Append, value_parser = parse_input)]
  pub input: Option<Vec<InputItem>>,

  #[clap(long, short = 'm')]
  pub mode: Option<Mode>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd')]
  pub dir: Option<String>,

  #[clap(long)]
  pub public_path: Option<String>,

  #[clap(long)]
  pub entry_filenames: Option<String>,

  #[clap(long)]
  pub chunk_filenames: Option<String>,

  #[clap(long)]
  pub devtool: Option<Devtool>,
}

#[derive(Args)]
pub struct EnhanceArgs {
  /// Only print errors.
  #[clap(long, short = 's')]
  pub silent: bool,

  /// Build without writing anything.
  #[clap(long)]
  pub dry_run: bool,
}

fn parse_input(value: &str) -> Result<InputItem, String> {
  match value.split_once('=') {
    Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(InputItem::new(name, [path])),
    _ => Err(format!("expected `name=path`, got {value:?}")),
  }
}

/// Merges repeated names into one entry, keeping first-seen order.
pub fn merge_inputs(items: Vec<InputItem>) -> Vec<InputItem> {
  let mut merged: Vec<InputItem> = Vec::with_capacity(items.len());
  for item in items {
    match merged.iter_mut().find(|existing| existing.name == item.name) {
      Some(existing) => existing.import.extend(item.import),
      None => merged.push(item),
    }
  }
  merged
}

#[test]
fn repeated_entry_names_are_merged() {
  let items = ["index=./a.js", "admin=./admin.js", "index=./b.js"]
    .into_iter()
    .map(|value| parse_input(value).unwrap())
    .collect();
  assert_eq!(
    merge_inputs(items),
    vec![InputItem::new("index", ["./a.js", "./b.js"]), InputItem::new("admin", ["./admin.js"])]
  );
  assert!(parse_input("./a.js").is_err());
}
