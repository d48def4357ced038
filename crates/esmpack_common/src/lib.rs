mod bundler_options;
mod module;
mod module_loader;
mod types;

pub use bundler_options::{
  BundlerOptions, input_item::InputItem, normalized_bundler_options::NormalizedBundlerOptions,
  platform::Platform, resolve_options::ResolveOptions,
};

pub use crate::{
  module::{Module, external_module::ExternalModule, normal_module::NormalModule},
  module_loader::{ModuleLoaderMsg, task_result::NormalModuleTaskResult},
  types::{
    condition_set::ConditionSet,
    entry_point::EntryPoint,
    import_kind::ImportKind,
    import_record::{ImportRecord, RawImportRecord, ResolvedImportRecord},
    module_format::ModuleFormat,
    module_id::ModuleId,
    package_json::{PackageJson, PackageType},
    raw_idx::{ImportRecordIdx, ModuleIdx},
    resolution_result::ResolutionResult,
    resolved_id::ResolvedId,
    target::Target,
  },
};
