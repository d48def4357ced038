use std::path::Path;

use arcstr::ArcStr;

use crate::{ModuleFormat, ModuleId};

/// The outcome of resolving one specifier, shaped for the module loader.
#[derive(Debug, Clone)]
pub struct ResolvedId {
  pub id: ArcStr,
  pub format: ModuleFormat,
  /// Built-ins and data URLs are recorded in the graph but never loaded.
  pub is_external: bool,
}

impl ResolvedId {
  pub fn debug_id(&self, cwd: impl AsRef<Path>) -> String {
    if self.id.trim_start().starts_with("data:") {
      return format!("<{}>", self.id);
    }
    ModuleId::new(ArcStr::clone(&self.id)).stabilize(cwd.as_ref())
  }
}
