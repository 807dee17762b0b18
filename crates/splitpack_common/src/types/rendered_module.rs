/// How one module ended up in a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModule {
  pub stable_id: String,
  /// Pipeline of the rule that transformed the module, `None` for pass-through modules.
  pub pipeline: Option<String>,
  pub exec_order: u32,
  /// Stable ids of the modules importing this one, in execution order.
  pub importers: Vec<String>,
}
