mod json;
mod modernizr;
mod script;

use std::path::Path;

use splitpack_common::TransformStep;

pub struct LoaderContext<'a> {
  /// Project relative id, used as the source name of produced maps.
  pub stable_id: &'a str,
  pub target: &'a str,
}

#[derive(Debug)]
pub struct LoaderOutput {
  pub code: String,
  /// Source map JSON. Only meaningful when produced by the last step of a pipeline.
  pub map: Option<String>,
}

impl LoaderOutput {
  pub fn code(code: String) -> Self {
    Self { code, map: None }
  }
}

pub fn run_step(
  step: TransformStep,
  ctx: &LoaderContext<'_>,
  source: &str,
) -> Result<LoaderOutput, String> {
  match step {
    TransformStep::Script => script::transform(Path::new(ctx.stable_id), ctx.target, source),
    TransformStep::Json => json::transform(source),
    TransformStep::Modernizr => modernizr::transform(source),
  }
}
