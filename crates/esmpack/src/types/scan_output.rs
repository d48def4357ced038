use esmpack_common::{EntryPoint, Module, ModuleIdx};

use super::IndexModules;

/// The module graph reachable from the user defined entries.
#[derive(Debug)]
pub struct ScanOutput {
  /// Every module once, keyed by its position in discovery order.
  pub module_table: IndexModules,
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
}

impl ScanOutput {
  /// Look a module up by its id: the canonical path for files, the URL otherwise.
  pub fn module_by_id(&self, id: &str) -> Option<&Module> {
    self.module_table.iter().find(|module| module.id() == id)
  }

  pub fn entry_modules(&self) -> impl Iterator<Item = &Module> + '_ {
    self.entry_points.iter().map(|entry| &self.module_table[entry.idx])
  }

  pub fn dependencies(&self, idx: ModuleIdx) -> impl Iterator<Item = &Module> + '_ {
    self.module_table[idx]
      .import_records()
      .iter()
      .map(|rec| &self.module_table[rec.resolved_module()])
  }
}
