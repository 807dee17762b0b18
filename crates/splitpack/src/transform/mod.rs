pub mod cache;
mod loaders;

use splitpack_common::{
  AppliedTransform, BuildDiagnostic, NormalizedBundlerOptions, TransformRule,
};
use splitpack_error::BuildResult;

use self::{
  cache::{CachedTransform, TransformCache},
  loaders::{run_step, LoaderContext, LoaderOutput},
};

#[derive(Debug)]
pub struct TransformOutput {
  pub code: String,
  pub map: Option<String>,
  /// `None` when no rule applied and the source passed through untouched.
  pub applied: Option<AppliedTransform>,
}

/// Routes a module through the first rule that applies to it.
pub struct TransformDispatcher<'a> {
  options: &'a NormalizedBundlerOptions,
  cache: &'a TransformCache,
}

impl<'a> TransformDispatcher<'a> {
  pub fn new(options: &'a NormalizedBundlerOptions, cache: &'a TransformCache) -> Self {
    Self { options, cache }
  }

  pub fn dispatch(
    &self,
    path: &str,
    stable_id: &str,
    source: String,
  ) -> BuildResult<TransformOutput> {
    let Some(rule) = self.options.rule_for(path) else {
      return Ok(TransformOutput { code: source, map: None, applied: None });
    };

    let applied = |from_cache| {
      Some(AppliedTransform { rule_index: rule.index, pipeline: rule.pipeline(), from_cache })
    };

    let key = rule.cache.then(|| TransformCache::key(stable_id, &source, rule));
    if let Some(hit) = key.as_deref().and_then(|key| self.cache.get(key)) {
      log::debug!("Transform cache hit for {stable_id}");
      let CachedTransform { code, map } = CachedTransform::clone(&hit);
      return Ok(TransformOutput { code, map, applied: applied(true) });
    }

    let LoaderOutput { code, map } = Self::run_pipeline(rule, stable_id, source)?;
    if let Some(key) = key {
      self.cache.insert(key, CachedTransform { code: code.clone(), map: map.clone() });
    }
    Ok(TransformOutput { code, map, applied: applied(false) })
  }

  /// Steps run in declared order, each one consuming the output of the previous.
  fn run_pipeline(
    rule: &TransformRule,
    stable_id: &str,
    source: String,
  ) -> BuildResult<LoaderOutput> {
    let ctx = LoaderContext { stable_id, target: &rule.target };
    let mut output = LoaderOutput::code(source);
    for step in &rule.steps {
      output = run_step(*step, &ctx, &output.code).map_err(|reason| BuildDiagnostic::Transform {
        path: stable_id.to_string(),
        pipeline: rule.pipeline(),
        reason: format!("{step}: {reason}"),
      })?;
    }
    Ok(output)
  }
}
