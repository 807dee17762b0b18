mod generate_chunk_filenames;
mod render_chunk_to_assets;

use splitpack_common::NormalizedBundlerOptions;

use crate::plan_stage::PlanStageOutput;

pub struct GenerateStage<'a> {
  plan_output: &'a mut PlanStageOutput,
  options: &'a NormalizedBundlerOptions,
}

impl<'a> GenerateStage<'a> {
  pub fn new(plan_output: &'a mut PlanStageOutput, options: &'a NormalizedBundlerOptions) -> Self {
    Self { plan_output, options }
  }
}
