use std::collections::hash_map::Entry;
use std::sync::Arc;

use arcstr::ArcStr;
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::Receiver;

use splitpack_common::{
  EntryPoint, Module, ModuleIdx, ModuleLoaderMsg, NormalModuleTaskResult, ResolvedId,
};
use splitpack_error::BuildResult;
use splitpack_fs::OsFileSystem;

use super::{module_task::ModuleTask, task_context::TaskContext};

use crate::types::{IndexModules, SharedOptions, SharedResolver, SharedTransformCache};

pub struct ModuleLoader {
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  modules: IndexVec<ModuleIdx, Option<Module>>,
  importers: IndexVec<ModuleIdx, Vec<ModuleIdx>>,
  /// Resolved path -> module. Only this loop schedules tasks, so every file is loaded once.
  visited: FxHashMap<ArcStr, ModuleIdx>,
}

#[derive(Debug)]
pub struct ModuleLoaderOutput {
  pub module_table: IndexModules,
  /// In declaration order.
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
}

impl ModuleLoader {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    transform_cache: SharedTransformCache,
  ) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);

    let shared_context = Arc::new(TaskContext { fs, options, resolver, transform_cache, tx });

    Self {
      rx,
      remaining: 0,
      shared_context,
      modules: IndexVec::new(),
      importers: IndexVec::new(),
      visited: FxHashMap::default(),
    }
  }

  pub async fn fetch_all_modules(
    mut self,
    user_defined_entries: Vec<(ArcStr, Vec<ResolvedId>)>,
  ) -> BuildResult<ModuleLoaderOutput> {
    let entry_points = user_defined_entries
      .into_iter()
      .map(|(name, resolved_ids)| {
        let mut modules = Vec::with_capacity(resolved_ids.len());
        for resolved_id in resolved_ids {
          let idx = self.try_spawn_new_task(resolved_id);
          if !modules.contains(&idx) {
            modules.push(idx);
          }
        }
        EntryPoint { name, modules }
      })
      .collect::<Vec<_>>();

    let mut warnings: Vec<anyhow::Error> = vec![];

    while self.remaining > 0 {
      let Some(msg) = self.rx.recv().await else {
        break;
      };

      match msg {
        ModuleLoaderMsg::NormalModuleDone(task_result) => {
          let NormalModuleTaskResult {
            mut module,
            resolved_deps,
            raw_import_records,
            warnings: task_result_warnings,
          } = task_result;

          warnings.extend(task_result_warnings);

          let importer = module.idx;
          let import_records = raw_import_records
            .into_iter()
            .zip(resolved_deps)
            .map(|(raw_rec, info)| {
              let id = self.try_spawn_new_task(info);
              if !self.importers[id].contains(&importer) {
                self.importers[id].push(importer);
              }
              raw_rec.into_resolved(id)
            })
            .collect();

          module.set_import_records(import_records);
          self.modules[importer] = Some(module);
          self.remaining -= 1;
        }
        ModuleLoaderMsg::BuildErrors(errors) => {
          // Tasks still in flight finish on their own, their results are dropped with `rx`.
          return Err(errors.into());
        }
      }
    }

    let module_table: IndexModules = self
      .modules
      .into_iter()
      .zip(self.importers)
      .map(|(module, importers)| {
        let mut module = module.expect("Module tasks did't complete as expected");
        module.importers = importers;
        module
      })
      .collect();

    Ok(ModuleLoaderOutput { module_table, entry_points, warnings })
  }

  fn try_spawn_new_task(&mut self, resolved_id: ResolvedId) -> ModuleIdx {
    match self.visited.entry(ArcStr::clone(&resolved_id.id)) {
      Entry::Occupied(visited) => *visited.get(),
      Entry::Vacant(not_visited) => {
        let idx = self.modules.push(None);
        self.importers.push(Vec::new());
        self.remaining += 1;

        log::debug!("Loading {}", resolved_id.debug_id(&self.shared_context.options.cwd));
        let task = ModuleTask::new(Arc::clone(&self.shared_context), idx, resolved_id);
        tokio::spawn(task.run());

        *not_visited.insert(idx)
      }
    }
  }
}
