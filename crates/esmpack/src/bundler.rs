use std::sync::Arc;

use esmpack_common::{BundlerOptions, NormalizedBundlerOptions};
use esmpack_error::BuildResult;
use esmpack_fs::OsFileSystem;
use esmpack_resolver::Resolver;
use tracing::debug;

use crate::{
  stages::scan::ScanStage,
  types::{scan_output::ScanOutput, SharedOptions, SharedResolver},
  utils::normalize_options::{normalize_options, NormalizeOptionsReturn},
};

pub struct Bundler {
  pub(crate) fs: OsFileSystem,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> Self {
    let NormalizeOptionsReturn { options, resolve_options } = normalize_options(options);

    let resolver: SharedResolver =
      Resolver::new(&resolve_options, options.cwd.clone(), OsFileSystem).into();
    debug!(
      platform = %options.platform,
      conditions = ?resolver.conditions().iter().collect::<Vec<_>>(),
      cwd = %options.cwd.display(),
      "created resolver"
    );

    Bundler { fs: OsFileSystem, options: Arc::new(options), resolver }
  }

  /// Build the module graph reachable from `input`.
  pub async fn scan(&mut self) -> BuildResult<ScanOutput> {
    let output =
      ScanStage::new(self.fs, Arc::clone(&self.options), Arc::clone(&self.resolver)).scan().await?;

    Ok(ScanOutput {
      module_table: output.modules,
      entry_points: output.entry_points,
      warnings: output.warnings,
    })
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  pub fn resolver(&self) -> &SharedResolver {
    &self.resolver
  }
}
