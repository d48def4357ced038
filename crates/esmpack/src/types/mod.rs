pub mod scan_output;

use std::sync::Arc;

use esmpack_common::{Module, ModuleIdx, NormalizedBundlerOptions};
use esmpack_fs::OsFileSystem;
use esmpack_resolver::Resolver;
use oxc_index::IndexVec;

pub type IndexModules = IndexVec<ModuleIdx, Module>;

pub type SharedResolver = Arc<Resolver<OsFileSystem>>;
pub type SharedOptions = Arc<NormalizedBundlerOptions>;
