use std::sync::Arc;

use arcstr::ArcStr;
use rustc_hash::FxHashMap;
use splitpack_common::{
  AppliedTransform, BuildDiagnostic, ImportKind, Module, ModuleId, ModuleIdx, ModuleLoaderMsg,
  NormalModuleTaskResult, ResolvedId,
};
use splitpack_ecmascript::EcmaCompiler;
use splitpack_error::{BuildResult, BuildStage};

use crate::{
  transform::{TransformDispatcher, TransformOutput},
  utils::{load_source::load_source, resolve_id::resolve_id},
};

use super::task_context::TaskContext;

fn pipeline_name(applied: Option<&AppliedTransform>) -> String {
  applied.map_or_else(|| "pass-through".to_string(), |applied| applied.pipeline.clone())
}

/// Loads, transforms and scans one module, then resolves what it imports.
pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  resolved_id: ResolvedId,
}

impl ModuleTask {
  pub fn new(ctx: Arc<TaskContext>, idx: ModuleIdx, resolved_id: ResolvedId) -> Self {
    Self { ctx, idx, resolved_id }
  }

  pub async fn run(self) {
    if let Err(errs) = self.run_inner().await {
      // The loader stops listening after the first failure.
      let _ = self.ctx.tx.send(ModuleLoaderMsg::BuildErrors(errs.0)).await;
    }
  }

  async fn run_inner(&self) -> BuildResult<()> {
    let options = &self.ctx.options;
    let id = ModuleId::new(ArcStr::clone(&self.resolved_id.id));
    let stable_id = id.stabilize(&options.cwd);

    let source = load_source(&self.ctx.fs, &id)?;
    let dispatcher = TransformDispatcher::new(options, &self.ctx.transform_cache);
    let TransformOutput { code, map, applied } = dispatcher.dispatch(&id, &stable_id, source)?;

    let raw_import_records = EcmaCompiler::scan_imports(&code).map_err(|reason| {
      BuildDiagnostic::Transform {
        path: stable_id.clone(),
        pipeline: pipeline_name(applied.as_ref()),
        reason: format!("Output is not valid JavaScript: {reason}"),
      }
    })?;

    let importer_dir = id.as_path().parent().unwrap_or(options.cwd.as_path());
    let resolved_deps = raw_import_records
      .iter()
      .map(|rec| {
        let (resolver, stage) = (&self.ctx.resolver, BuildStage::Transforming);
        resolve_id(resolver, stage, importer_dir, &rec.specifier, Some(&stable_id))
      })
      .collect::<BuildResult<Vec<_>>>()?;

    let ids = raw_import_records
      .iter()
      .zip(&resolved_deps)
      .map(|(rec, dep)| {
        let dep_id = ModuleId::new(ArcStr::clone(&dep.id)).stabilize(&options.cwd);
        (rec.specifier.clone(), dep_id)
      })
      .collect::<FxHashMap<_, _>>();
    let linked = EcmaCompiler::link_module(&code, &|specifier: &str| ids.get(specifier).cloned())
      .map_err(|reason| BuildDiagnostic::Transform {
        path: stable_id.clone(),
        pipeline: pipeline_name(applied.as_ref()),
        reason: format!("Output could not be linked: {reason}"),
      })?;

    let warnings = raw_import_records
      .iter()
      .filter(|rec| rec.kind == ImportKind::DynamicImport)
      .map(|rec| {
        anyhow::anyhow!(
          "{stable_id}: import({:?}) is bundled with its importer, no async chunk is created.",
          rec.specifier
        )
      })
      .collect();

    let module = Module {
      idx: self.idx,
      is_vendor: options.vendor.is_vendor(&id),
      id,
      stable_id,
      code: linked.code,
      map,
      prologue: linked.prologue,
      transform: applied,
      import_records: vec![],
      importers: vec![],
      exec_order: u32::MAX,
    };

    let _ = self
      .ctx
      .tx
      .send(ModuleLoaderMsg::NormalModuleDone(NormalModuleTaskResult {
        module,
        resolved_deps,
        raw_import_records,
        warnings,
      }))
      .await;

    Ok(())
  }
}
