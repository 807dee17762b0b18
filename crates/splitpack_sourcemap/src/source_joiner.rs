use oxc_sourcemap::{ConcatSourceMapBuilder, SourceMap};

use crate::source::Source;

/// Concatenates module bodies, keeping the source map of each one at its new line offset.
#[derive(Default)]
pub struct SourceJoiner<'source> {
  inner: Vec<Box<dyn Source + Send + 'source>>,
}

impl<'source> SourceJoiner<'source> {
  pub fn append_source<T: Source + Send + 'source>(&mut self, source: T) {
    self.inner.push(Box::new(source));
  }

  /// Joins all sources with `\n`. The returned map is `None` when no source carried one.
  pub fn join(&self) -> (String, Option<SourceMap>) {
    if self.inner.is_empty() {
      return (String::new(), None);
    }

    // One `\n` between each pair of sources.
    let size_hint =
      self.inner.iter().map(|source| source.content().len()).sum::<usize>() + self.inner.len() - 1;
    let mut ret_source = String::with_capacity(size_hint);

    let mut line_offset = 0;
    let mut sourcemaps = vec![];

    for (index, source) in self.inner.iter().enumerate() {
      if index > 0 {
        ret_source.push('\n');
        line_offset += 1;
      }
      if let Some(sourcemap) = source.sourcemap() {
        sourcemaps.push((sourcemap, line_offset));
      }
      ret_source.push_str(source.content());
      line_offset += source.lines_count();
    }

    let sourcemap = (!sourcemaps.is_empty())
      .then(|| ConcatSourceMapBuilder::from_sourcemaps(&sourcemaps).into_sourcemap());

    (ret_source, sourcemap)
  }
}

#[test]
fn joined_maps_are_offset_by_preceding_lines() {
  use crate::SourceMapSource;

  let mut joiner = SourceJoiner::default();
  joiner.append_source("// banner");
  joiner.append_source(SourceMapSource::with_line_map("a.js", "a();\nb();".to_string()));
  joiner.append_source("// next\n".to_string());

  let (code, map) = joiner.join();
  assert_eq!(code, "// banner\na();\nb();\n// next\n");

  let map = map.unwrap();
  let lines = map.get_tokens().map(|token| token.get_dst_line()).collect::<Vec<_>>();
  assert_eq!(lines, vec![1, 2]);
}
