use std::path::PathBuf;

use splitpack::{Bundler, BundlerOptions};

#[tokio::main]
async fn main() {
  let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/basic");

  let config = std::fs::read_to_string(root.join("splitpack.json")).expect("Failed to read config");
  let mut options = BundlerOptions::from_json(&config).expect("Invalid config");
  options.cwd = Some(root);

  let result = match Bundler::new(options) {
    Ok(mut bundler) => bundler.write().await,
    Err(errors) => Err(errors),
  };

  if let Err(errors) = result {
    for error in errors.iter() {
      eprintln!("{error}");
    }
  }
}
