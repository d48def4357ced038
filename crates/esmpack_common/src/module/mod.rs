pub mod external_module;
pub mod normal_module;

use oxc_index::IndexVec;

use crate::{
  ExternalModule, ImportRecordIdx, ModuleFormat, ModuleIdx, NormalModule, ResolvedImportRecord,
};

#[derive(Debug)]
pub enum Module {
  Normal(Box<NormalModule>),
  External(Box<ExternalModule>),
}

impl Module {
  pub fn idx(&self) -> ModuleIdx {
    match self {
      Self::Normal(v) => v.idx,
      Self::External(v) => v.idx,
    }
  }

  pub fn id(&self) -> &str {
    match self {
      Self::Normal(v) => &v.id,
      Self::External(v) => &v.name,
    }
  }

  pub fn stable_id(&self) -> &str {
    match self {
      Self::Normal(v) => &v.stable_id,
      Self::External(v) => &v.name,
    }
  }

  pub fn format(&self) -> ModuleFormat {
    match self {
      Self::Normal(v) => v.format,
      Self::External(v) => v.format,
    }
  }

  pub fn as_normal(&self) -> Option<&NormalModule> {
    match self {
      Self::Normal(v) => Some(v),
      Self::External(_) => None,
    }
  }

  pub fn as_normal_mut(&mut self) -> Option<&mut NormalModule> {
    match self {
      Self::Normal(v) => Some(v),
      Self::External(_) => None,
    }
  }

  /// External modules are never loaded, so they have no outgoing edges.
  pub fn import_records(&self) -> &[ResolvedImportRecord] {
    match self {
      Self::Normal(v) => v.import_records.as_raw_slice(),
      Self::External(_) => &[],
    }
  }

  pub fn set_import_records(&mut self, records: IndexVec<ImportRecordIdx, ResolvedImportRecord>) {
    match self {
      Self::Normal(v) => v.import_records = records,
      Self::External(_) => panic!("set_import_records should be called on NormalModule"),
    }
  }

  pub fn is_external(&self) -> bool {
    matches!(self, Self::External(..))
  }
}

impl From<NormalModule> for Module {
  fn from(module: NormalModule) -> Self {
    Self::Normal(Box::new(module))
  }
}

impl From<ExternalModule> for Module {
  fn from(module: ExternalModule) -> Self {
    Self::External(Box::new(module))
  }
}
