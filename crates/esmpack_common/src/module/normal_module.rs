use esmpack_utils::indexmap::FxIndexSet;
use oxc_index::IndexVec;

use crate::{ImportRecordIdx, ModuleFormat, ModuleId, ModuleIdx, ResolvedImportRecord};

#[derive(Debug)]
pub struct NormalModule {
  pub idx: ModuleIdx,
  pub is_user_defined_entry: bool,
  pub id: ModuleId,
  /// `stable_id` is calculated based on `id` to be stable across machine and os.
  pub stable_id: String,
  pub format: ModuleFormat,
  pub has_export_declarations: bool,
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
  /// Modules that statically import this one, in discovery order.
  pub importers: FxIndexSet<ModuleId>,
}

impl NormalModule {
  pub fn dependencies(&self) -> impl Iterator<Item = ModuleIdx> + '_ {
    self.import_records.iter().map(ResolvedImportRecord::resolved_module)
  }
}
