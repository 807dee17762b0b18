use xxhash_rust::xxh3::xxh3_128;

/// Hex encoded 128-bit xxh3 digest. Stable across platforms and runs.
pub fn xxhash_hex(input: &[u8]) -> String {
  format!("{:032x}", xxh3_128(input))
}

/// Digest of several parts, each length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn xxhash_hex_of_parts<'a>(parts: impl IntoIterator<Item = &'a [u8]>) -> String {
  let mut buf = Vec::new();
  for part in parts {
    buf.extend_from_slice(&(part.len() as u64).to_le_bytes());
    buf.extend_from_slice(part);
  }
  xxhash_hex(&buf)
}

#[test]
fn test_xxhash_hex() {
  assert_eq!(xxhash_hex(b"hello").len(), 32);
  assert_eq!(xxhash_hex(b"hello"), xxhash_hex(b"hello"));
  assert_ne!(xxhash_hex(b"hello"), xxhash_hex(b"hello!"));
  assert_ne!(
    xxhash_hex_of_parts([b"ab".as_slice(), b"c".as_slice()]),
    xxhash_hex_of_parts([b"a".as_slice(), b"bc".as_slice()])
  );
}
