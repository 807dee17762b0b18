#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
  /// Application chunk of the entry at this position in the declared entry order.
  EntryPoint { entry_index: usize },
  /// The shared chunk holding every third-party module.
  Vendor,
}

impl ChunkKind {
  pub fn is_entry(self) -> bool {
    matches!(self, Self::EntryPoint { .. })
  }
}
