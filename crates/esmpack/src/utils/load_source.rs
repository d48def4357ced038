use std::path::Path;

use esmpack_common::{ModuleFormat, ResolvedId};
use esmpack_ecmascript::SourceType;
use esmpack_fs::FileSystem;

pub fn load_source(fs: &dyn FileSystem, resolved_id: &ResolvedId) -> anyhow::Result<String> {
  Ok(fs.read_to_string(Path::new(resolved_id.id.as_str()))?)
}

/// How a module of `format` is parsed for its dependencies, `None` for modules that have none the
/// graph can see.
pub fn source_type_of(format: ModuleFormat) -> Option<SourceType> {
  match format {
    ModuleFormat::Module => Some(SourceType::mjs()),
    ModuleFormat::CommonJs => Some(SourceType::cjs()),
    ModuleFormat::Json | ModuleFormat::Builtin | ModuleFormat::Undefined => None,
  }
}
