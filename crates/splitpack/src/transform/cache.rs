use std::{
  io,
  path::{Path, PathBuf},
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
};

use dashmap::{mapref::entry::Entry, DashMap};
use serde::{Deserialize, Serialize};
use splitpack_common::TransformRule;
use splitpack_fs::{FileSystem, OsFileSystem};
use splitpack_utils::xxhash::xxhash_hex_of_parts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedTransform {
  pub code: String,
  pub map: Option<String>,
}

/// Transform results keyed by `xxh3(source) + rule identity`, scoped to the module since
/// produced source maps name it.
///
/// The in-memory layer lives as long as the owning `Bundler`. With a cache directory every
/// entry is also persisted as `<key>.json`, written to a temporary file first and renamed
/// into place, so readers never observe a half written entry.
pub struct TransformCache {
  fs: OsFileSystem,
  dir: Option<PathBuf>,
  memory: DashMap<String, Arc<CachedTransform>>,
  hits: AtomicUsize,
  misses: AtomicUsize,
  tmp_counter: AtomicUsize,
}

impl TransformCache {
  pub fn new(fs: OsFileSystem, dir: Option<PathBuf>) -> Self {
    Self {
      fs,
      dir,
      memory: DashMap::default(),
      hits: AtomicUsize::new(0),
      misses: AtomicUsize::new(0),
      tmp_counter: AtomicUsize::new(0),
    }
  }

  pub fn key(stable_id: &str, source: &str, rule: &TransformRule) -> String {
    xxhash_hex_of_parts([stable_id.as_bytes(), source.as_bytes(), rule.identity().as_bytes()])
  }

  pub fn get(&self, key: &str) -> Option<Arc<CachedTransform>> {
    let found = self.memory.get(key).map(|hit| Arc::clone(hit.value())).or_else(|| {
      let cached = Arc::new(self.read_from_disk(key)?);
      Some(Arc::clone(self.memory.entry(key.to_string()).or_insert(cached).value()))
    });

    let counter = if found.is_some() { &self.hits } else { &self.misses };
    counter.fetch_add(1, Ordering::Relaxed);
    found
  }

  /// The first insert of a key wins and is the only one persisted.
  pub fn insert(&self, key: String, cached: CachedTransform) {
    let cached = Arc::new(cached);
    let key = match self.memory.entry(key) {
      Entry::Occupied(_) => return,
      Entry::Vacant(vacant) => {
        let key = vacant.key().clone();
        vacant.insert(Arc::clone(&cached));
        key
      }
    };
    self.write_to_disk(&key, &cached);
  }

  pub fn hits(&self) -> usize {
    self.hits.load(Ordering::Relaxed)
  }

  pub fn misses(&self) -> usize {
    self.misses.load(Ordering::Relaxed)
  }

  pub fn len(&self) -> usize {
    self.memory.len()
  }

  pub fn is_empty(&self) -> bool {
    self.memory.is_empty()
  }

  fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
  }

  fn read_from_disk(&self, key: &str) -> Option<CachedTransform> {
    let path = Self::entry_path(self.dir.as_deref()?, key);
    let bytes = match self.fs.read(&path) {
      Ok(bytes) => bytes,
      Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
      Err(err) => {
        log::warn!("Ignoring unreadable cache entry {}: {err}", path.display());
        return None;
      }
    };
    serde_json::from_slice(&bytes)
      .map_err(|err| log::warn!("Ignoring corrupted cache entry {}: {err}", path.display()))
      .ok()
  }

  fn write_to_disk(&self, key: &str, cached: &CachedTransform) {
    let Some(dir) = self.dir.as_deref() else {
      return;
    };
    let tmp = dir.join(format!(
      "{key}.json.{}-{}.tmp",
      std::process::id(),
      self.tmp_counter.fetch_add(1, Ordering::Relaxed)
    ));

    let written = serde_json::to_vec(cached)
      .map_err(io::Error::other)
      .and_then(|bytes| {
        self.fs.create_dir_all(dir)?;
        self.fs.write(&tmp, &bytes)
      })
      .and_then(|()| self.fs.rename(&tmp, &Self::entry_path(dir, key)));

    // The cache only speeds builds up, failing to persist it is not a build error.
    if let Err(err) = written {
      log::warn!("Failed to persist cache entry {key} to {}: {err}", dir.display());
      let _ = self.fs.remove_file(&tmp);
    }
  }
}
