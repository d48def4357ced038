mod bundler;
mod module_loader;
mod stages;
mod types;
mod utils;

pub use crate::{bundler::Bundler, types::scan_output::ScanOutput};
pub use esmpack_common::*;
pub use esmpack_error::{BuildError, BuildResult, ResolveError, ResolveErrorKind};
pub use esmpack_resolver::Resolver;
