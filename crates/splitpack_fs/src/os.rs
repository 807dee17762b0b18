use std::{fs, io, path::Path};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
  }

  fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
  }

  fn remove_file(&self, path: &Path) -> io::Result<()> {
    fs::remove_file(path)
  }

  fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
    fs::remove_dir_all(path)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }
}

#[test]
fn write_then_rename() {
  let dir = tempfile::tempdir().unwrap();
  let fs = OsFileSystem;
  let tmp = dir.path().join("a.tmp");
  let target = dir.path().join("nested").join("a.json");

  fs.write(&tmp, b"{}").unwrap();
  fs.create_dir_all(target.parent().unwrap()).unwrap();
  fs.rename(&tmp, &target).unwrap();

  assert!(!fs.exists(&tmp));
  assert_eq!(fs.read_to_string(&target).unwrap(), "{}");
  assert!(fs.is_dir(dir.path()));

  fs.remove_dir_all(&dir.path().join("nested")).unwrap();
  assert!(!fs.exists(&target));
}
