use memchr::memmem;
use oxc_sourcemap::{SourceMap, SourceMapBuilder};

#[inline]
pub fn lines_count(str: &str) -> u32 {
  u32::try_from(memmem::find_iter(str.as_bytes(), "\n").count()).unwrap_or(u32::MAX)
}

pub trait Source {
  fn content(&self) -> &str;

  fn sourcemap(&self) -> Option<&SourceMap> {
    None
  }

  fn lines_count(&self) -> u32 {
    lines_count(self.content())
  }
}

impl Source for &str {
  fn content(&self) -> &str {
    self
  }
}

impl Source for String {
  fn content(&self) -> &str {
    self
  }
}

#[derive(Debug)]
pub struct SourceMapSource {
  content: String,
  sourcemap: SourceMap,
  pre_computed_lines_count: Option<u32>,
}

impl SourceMapSource {
  pub fn new(content: String, sourcemap: SourceMap) -> Self {
    Self { content, sourcemap, pre_computed_lines_count: None }
  }

  /// Maps every line of `content` onto the same line of `source_name`, with `content`
  /// embedded as the original source. Line granularity only.
  pub fn with_line_map(source_name: &str, content: String) -> Self {
    let mut builder = SourceMapBuilder::default();
    let source_id = builder.add_source_and_content(source_name, &content);
    let mut lines = 0;
    for (line, text) in content.split('\n').enumerate() {
      let line = u32::try_from(line).unwrap_or(u32::MAX);
      if !text.is_empty() {
        builder.add_token(line, 0, line, 0, Some(source_id), None);
      }
      lines = line;
    }
    Self { sourcemap: builder.into_sourcemap(), content, pre_computed_lines_count: Some(lines) }
  }
}

impl Source for SourceMapSource {
  fn content(&self) -> &str {
    &self.content
  }

  fn sourcemap(&self) -> Option<&SourceMap> {
    Some(&self.sourcemap)
  }

  fn lines_count(&self) -> u32 {
    self.pre_computed_lines_count.unwrap_or_else(|| lines_count(&self.content))
  }
}

#[test]
fn test_lines_count() {
  assert_eq!(lines_count("a\nb\nc"), 2);
  assert_eq!(lines_count("a\nb\nc\n"), 3);
  assert_eq!(lines_count("a"), 0);
}

#[test]
fn line_map_points_back_to_the_same_lines() {
  let source = SourceMapSource::with_line_map("src/a.js", "let a = 1;\n\nlet b = 2;\n".to_string());
  assert_eq!(source.lines_count(), 3);

  let map = source.sourcemap().unwrap();
  assert_eq!(map.get_sources().collect::<Vec<_>>().len(), 1);
  assert_eq!(map.get_tokens().count(), 2);
}
