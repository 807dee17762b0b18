use std::iter;

use rustc_hash::{FxHashMap, FxHashSet};
use splitpack_common::ModuleIdx;

use super::PlanStage;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

impl PlanStage<'_> {
  /// Assigns `exec_order`: depth-first post-order from the entries, in declaration order.
  pub(super) fn sort_modules(&mut self) {
    let mut execution_stack = self
      .entry_points
      .iter()
      .rev()
      .flat_map(|entry| entry.modules.iter().rev())
      .map(|&idx| Status::ToBeExecuted(idx))
      .collect::<Vec<_>>();

    let mut executed_ids = FxHashSet::default();
    let mut stack_indexes_of_executing_id = FxHashMap::default();

    let mut next_exec_order = 0;
    let mut circular_dependencies: Vec<Box<[ModuleIdx]>> = vec![];

    while let Some(status) = execution_stack.pop() {
      match status {
        Status::ToBeExecuted(id) => {
          if executed_ids.contains(&id) {
            // Try to check if there is a circular dependency
            if let Some(index) = stack_indexes_of_executing_id.get(&id).copied() {
              let cycle = execution_stack[index..]
                .iter()
                .filter_map(|action| match action {
                  // Only modules with `Status::WaitForExit` are on the execution chain
                  Status::ToBeExecuted(_) => None,
                  Status::WaitForExit(id) => Some(*id),
                })
                .chain(iter::once(id))
                .collect::<Box<[_]>>();
              if !circular_dependencies.contains(&cycle) {
                circular_dependencies.push(cycle);
              }
            }
          } else {
            executed_ids.insert(id);
            execution_stack.push(Status::WaitForExit(id));
            stack_indexes_of_executing_id.insert(id, execution_stack.len() - 1);

            let deps = self.module_table[id].dependencies().collect::<Vec<_>>();
            execution_stack.extend(deps.into_iter().rev().map(Status::ToBeExecuted));
          }
        }
        Status::WaitForExit(id) => {
          self.module_table[id].exec_order = next_exec_order;
          next_exec_order += 1;
          stack_indexes_of_executing_id.remove(&id);
        }
      }
    }

    for cycle in circular_dependencies {
      let paths = cycle
        .iter()
        .map(|id| self.module_table[*id].stable_id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ");
      log::warn!("Circular dependency: {paths}");
      self.warnings.push(anyhow::anyhow!("Circular dependency: {paths}."));
    }
  }
}
