use std::{
  io,
  path::{Path, PathBuf},
};

use splitpack_common::{BuildDiagnostic, BuildStage, OutputAsset};
use splitpack_error::BuildResult;
use splitpack_fs::FileSystem;

/// Writes `assets` under `dir` as a whole or not at all.
///
/// Every asset is first written into a staging directory next to `dir`. Assets are moved into
/// place only once all of them were staged and no destination is blocked. Files overwritten by
/// the move are put back if a later move fails. The staging directory is always removed.
pub fn emit_assets<Fs: FileSystem>(
  fs: &Fs,
  dir: &Path,
  assets: &[OutputAsset],
) -> BuildResult<()> {
  let mut emission = Emission { fs, dir, staging: staging_dir(dir), moves: vec![] };

  let result = emission.stage(assets).and_then(|()| emission.commit(assets));
  if result.is_err() {
    emission.rollback();
  }
  if fs.exists(&emission.staging) {
    if let Err(err) = fs.remove_dir_all(&emission.staging) {
      log::warn!("Failed to remove {}: {err}", emission.staging.display());
    }
  }
  Ok(result?)
}

fn staging_dir(dir: &Path) -> PathBuf {
  let name = dir.file_name().map_or_else(|| "dist".into(), |name| name.to_string_lossy());
  dir.with_file_name(format!(".{name}.splitpack-{}", std::process::id()))
}

fn io_error(path: &Path, source: io::Error) -> BuildDiagnostic {
  BuildDiagnostic::Io { stage: BuildStage::Emitted, path: path.to_path_buf(), source }
}

struct Move {
  dest: PathBuf,
  /// Where the file previously at `dest` was set aside.
  replaced: Option<PathBuf>,
  landed: bool,
}

struct Emission<'a, Fs: FileSystem> {
  fs: &'a Fs,
  dir: &'a Path,
  staging: PathBuf,
  moves: Vec<Move>,
}

impl<Fs: FileSystem> Emission<'_, Fs> {
  fn staged(&self, asset: &OutputAsset) -> PathBuf {
    self.staging.join("assets").join(&asset.filename)
  }

  fn create_parent(&self, path: &Path) -> io::Result<()> {
    path.parent().map_or(Ok(()), |parent| self.fs.create_dir_all(parent))
  }

  fn stage(&self, assets: &[OutputAsset]) -> Result<(), BuildDiagnostic> {
    for asset in assets {
      let staged = self.staged(asset);
      self
        .create_parent(&staged)
        .and_then(|()| self.fs.write(&staged, asset.content_as_bytes()))
        .map_err(|source| io_error(&self.dir.join(&asset.filename), source))?;
    }
    Ok(())
  }

  /// A destination that is a directory, or sits below a file, can't take the asset.
  fn check_destination(&self, dest: &Path) -> io::Result<()> {
    if self.fs.is_dir(dest) {
      return Err(io::Error::other("a directory is in the way"));
    }
    let parents = dest.ancestors().skip(1).take_while(|parent| parent.starts_with(self.dir));
    for parent in parents {
      if self.fs.exists(parent) && !self.fs.is_dir(parent) {
        return Err(io::Error::other(format!("{} is not a directory", parent.display())));
      }
    }
    Ok(())
  }

  fn commit(&mut self, assets: &[OutputAsset]) -> Result<(), BuildDiagnostic> {
    for asset in assets {
      let dest = self.dir.join(&asset.filename);
      self.check_destination(&dest).map_err(|source| io_error(&dest, source))?;
    }

    for asset in assets {
      let dest = self.dir.join(&asset.filename);
      self.move_into_place(asset, &dest).map_err(|source| io_error(&dest, source))?;
    }
    Ok(())
  }

  fn move_into_place(&mut self, asset: &OutputAsset, dest: &Path) -> io::Result<()> {
    self.create_parent(dest)?;
    let replaced = if self.fs.exists(dest) {
      let aside = self.staging.join("replaced").join(&asset.filename);
      self.create_parent(&aside)?;
      self.fs.rename(dest, &aside)?;
      Some(aside)
    } else {
      None
    };
    self.moves.push(Move { dest: dest.to_path_buf(), replaced, landed: false });
    self.fs.rename(&self.staged(asset), dest)?;
    if let Some(last) = self.moves.last_mut() {
      last.landed = true;
    }
    Ok(())
  }

  fn rollback(&mut self) {
    for Move { dest, replaced, landed } in self.moves.drain(..).rev() {
      if landed {
        if let Err(err) = self.fs.remove_file(&dest) {
          log::warn!("Failed to remove {}: {err}", dest.display());
        }
      }
      if let Some(replaced) = replaced {
        if let Err(err) = self.fs.rename(&replaced, &dest) {
          log::warn!("Failed to restore {}: {err}", dest.display());
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use splitpack_fs::OsFileSystem;

  use super::*;

  fn assets() -> Vec<OutputAsset> {
    vec![
      OutputAsset::bundle("index.js".to_string(), "index();\n".to_string()),
      OutputAsset::source_map("maps/index.js.map".to_string(), "{}".to_string()),
    ]
  }

  #[test]
  fn assets_replace_previous_output_and_leave_other_files_alone() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("dist");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.js"), "stale();\n").unwrap();
    fs::write(dir.join("robots.txt"), "").unwrap();

    emit_assets(&OsFileSystem, &dir, &assets()).unwrap();

    assert_eq!(fs::read_to_string(dir.join("index.js")).unwrap(), "index();\n");
    assert_eq!(fs::read_to_string(dir.join("maps/index.js.map")).unwrap(), "{}");
    assert!(dir.join("robots.txt").exists());
    let siblings = fs::read_dir(root.path()).unwrap().count();
    assert_eq!(siblings, 1, "the staging directory is removed");
  }

  #[test]
  fn a_file_in_place_of_a_directory_blocks_every_asset() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("dist");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.js"), "stale();\n").unwrap();
    fs::write(dir.join("maps"), "").unwrap();

    let err = emit_assets(&OsFileSystem, &dir, &assets()).unwrap_err();
    let diagnostic = err.diagnostics().next().unwrap();
    assert_eq!(diagnostic.stage(), BuildStage::Emitted);
    assert!(diagnostic.to_string().contains("is not a directory"), "{diagnostic}");

    assert_eq!(fs::read_to_string(dir.join("index.js")).unwrap(), "stale();\n");
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 1);
  }
}
