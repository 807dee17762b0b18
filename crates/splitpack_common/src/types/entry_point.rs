use arcstr::ArcStr;

use crate::ModuleIdx;

/// A declared entry after its files were resolved. `modules` keeps the declared order.
#[derive(Debug)]
pub struct EntryPoint {
  pub name: ArcStr,
  pub modules: Vec<ModuleIdx>,
}
