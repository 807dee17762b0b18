/// Makes a chunk name safe to substitute into an output filename template.
///
/// `/` is kept so names like `pages/home` still emit into sub directories, but empty,
/// `.` and `..` segments are dropped so a name can never escape the output directory.
pub fn sanitize_file_name(str: &str) -> String {
  let mut sanitized = String::with_capacity(str.len());
  for segment in str.split(['/', '\\']) {
    if segment.is_empty() || segment == "." || segment == ".." {
      continue;
    }
    if !sanitized.is_empty() {
      sanitized.push('/');
    }
    for char in segment.chars() {
      if char.is_ascii_alphanumeric() || matches!(char, '-' | '_' | '.' | '@') {
        sanitized.push(char);
      } else {
        sanitized.push('_');
      }
    }
  }
  sanitized
}

#[test]
fn test_sanitize_file_name() {
  assert_eq!(sanitize_file_name("\0+a=Z_0-"), "__a_Z_0-");
  assert_eq!(sanitize_file_name("vendor"), "vendor");
  assert_eq!(sanitize_file_name("../pages//home"), "pages/home");
  assert_eq!(sanitize_file_name("a\\b c"), "a/b_c");
}
