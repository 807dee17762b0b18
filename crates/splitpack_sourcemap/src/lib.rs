mod source;
mod source_joiner;

pub use crate::{
  source::{Source, SourceMapSource},
  source_joiner::SourceJoiner,
};
pub use oxc_sourcemap::SourceMap;
