mod args;
mod types;

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
  time::Instant,
};

use ansi_term::Colour;
use args::{merge_inputs, EnhanceArgs, InputArgs, OutputArgs};
use clap::Parser;

use splitpack::{
  BuildDiagnostic, BuildError, BuildResult, BuildStage, BundleOutput, Bundler, BundlerOptions,
  OutputAssetKind,
};

const DEFAULT_CONFIG: &str = "splitpack.json";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn read_config(path: &Path) -> BuildResult<BundlerOptions> {
  let json = std::fs::read_to_string(path).map_err(|source| BuildDiagnostic::Io {
    stage: BuildStage::Configured,
    path: path.to_path_buf(),
    source,
  })?;
  Ok(BundlerOptions::from_json(&json)?)
}

/// The configuration file, with command line flags taking precedence over it.
fn load_options(args: Commands) -> BuildResult<BundlerOptions> {
  let config = args.input.config.or_else(|| {
    let default = PathBuf::from(DEFAULT_CONFIG);
    default.is_file().then_some(default)
  });

  let mut options = match &config {
    Some(path) => read_config(path)?,
    None => BundlerOptions::default(),
  };

  // `--cwd`, then the configured `cwd` relative to the configuration file, then the
  // directory of the configuration file.
  let config_dir =
    config.as_deref().and_then(Path::parent).filter(|dir| !dir.as_os_str().is_empty());
  options.cwd = match (args.input.cwd, options.cwd.take(), config_dir) {
    (Some(cwd), _, _) => Some(cwd),
    (None, Some(cwd), Some(dir)) => Some(dir.join(cwd)),
    (None, None, dir) => dir.map(Path::to_path_buf),
    (None, cwd, None) => cwd,
  };
  if let Some(input) = args.input.input {
    options.input = Some(merge_inputs(input));
  }
  if let Some(mode) = args.input.mode {
    options.mode = Some(mode.into());
  }
  if let Some(devtool) = args.output.devtool {
    options.devtool = Some(devtool.into());
  }

  let output = options.output.get_or_insert_with(Default::default);
  output.path = args.output.dir.or(output.path.take());
  output.public_path = args.output.public_path.or(output.public_path.take());
  output.filename = args.output.entry_filenames.or(output.filename.take());
  output.chunk_filename = args.output.chunk_filenames.or(output.chunk_filename.take());

  Ok(options)
}

fn print_output(output: &BundleOutput, dir: &Path) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(output.assets.len());

  for asset in &output.assets {
    let size = format!("{:.2}", asset.content.len() as f64 / 1024.0);

    right = right.max(size.len());
    left = left.max(asset.filename.len());

    let asset_type = match asset.kind {
      OutputAssetKind::Bundle => "bundle",
      OutputAssetKind::SourceMap => "map",
    };
    assets.push((asset.filename.as_str(), size, asset_type));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;
  let prefix = format!("{}/", dir.display());

  for (filename, size, asset_type) in assets {
    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint(&prefix),
      color.paint(filename),
      "",
      dim.paint(asset_type),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename.len(),
      right = right - size.len()
    );
  }
}

fn print_errors(errors: &BuildError) {
  for error in errors.iter() {
    println!("{} {}", Colour::Red.paint("Error:"), error);
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let args = Commands::parse();
  let EnhanceArgs { silent, dry_run } = args.enhance;

  let start = Instant::now();
  let result = match load_options(args).and_then(Bundler::new) {
    Ok(mut bundler) => {
      let result = if dry_run { bundler.generate().await } else { bundler.write().await };
      result.map(|output| (output, bundler.options().dir.clone()))
    }
    Err(errors) => Err(errors),
  };

  match result {
    Ok((output, dir)) => {
      if !silent {
        for warning in &output.warnings {
          println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
        }
        if !output.assets.is_empty() {
          print_output(&output, &dir);
        }
        let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
        let elapsed = Colour::White.bold().paint(elapsed);
        println!("\n{} Finished in {elapsed}", Colour::Green.paint("✔"));
      }
      ExitCode::SUCCESS
    }
    Err(errors) => {
      print_errors(&errors);
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn options_for(config: &str, extra_args: &[&str]) -> (tempfile::TempDir, BundlerOptions) {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("splitpack.json");
    std::fs::write(&config_path, config).unwrap();

    let mut argv = vec!["splitpack".to_string(), "--config".to_string()];
    argv.push(config_path.to_string_lossy().into_owned());
    argv.extend(extra_args.iter().map(ToString::to_string));
    let options = load_options(Commands::try_parse_from(argv).unwrap()).unwrap();
    (dir, options)
  }

  #[test]
  fn configured_cwd_is_relative_to_the_config_file() {
    let (dir, options) = options_for(r#"{ "cwd": "./site" }"#, &[]);
    assert_eq!(options.cwd, Some(dir.path().join("site")));
  }

  #[test]
  fn config_file_directory_is_the_default_cwd() {
    let (dir, options) = options_for("{}", &[]);
    assert_eq!(options.cwd.as_deref(), Some(dir.path()));
  }

  #[test]
  fn cwd_flag_beats_the_configured_cwd() {
    let (_dir, options) = options_for(r#"{ "cwd": "./site" }"#, &["--cwd", "/elsewhere"]);
    assert_eq!(options.cwd, Some(PathBuf::from("/elsewhere")));
  }

  #[test]
  fn flags_override_configured_output() {
    let config = r#"{ "output": { "path": "./dist", "filename": "[name].js" } }"#;
    let (_dir, options) = options_for(config, &["-d", "./public", "--mode", "development"]);
    let output = options.output.unwrap();
    assert_eq!(output.path.as_deref(), Some("./public"));
    assert_eq!(output.filename.as_deref(), Some("[name].js"));
    assert!(options.mode.is_some());
  }
}
