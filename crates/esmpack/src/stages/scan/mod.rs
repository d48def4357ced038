use std::sync::Arc;

use arcstr::ArcStr;
use esmpack_common::{InputItem, ResolvedId};
use esmpack_error::BuildResult;
use esmpack_fs::OsFileSystem;

use crate::{
  module_loader::{ModuleLoader, ModuleLoaderOutput},
  types::{SharedOptions, SharedResolver},
  utils::resolve_id::resolve_id,
};

pub type ScanStageOutput = ModuleLoaderOutput;

pub struct ScanStage {
  fs: OsFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
}

impl ScanStage {
  pub fn new(fs: OsFileSystem, options: SharedOptions, resolver: SharedResolver) -> Self {
    Self { fs, options, resolver }
  }

  pub async fn scan(&mut self) -> BuildResult<ScanStageOutput> {
    if self.options.input.is_empty() {
      Err(vec![anyhow::anyhow!("No entry given, pass at least one input module")])?;
    }

    let entries = self.resolve_entries()?;

    let loader = ModuleLoader::new(self.fs, Arc::clone(&self.options), Arc::clone(&self.resolver));
    loader.fetch_all_modules(entries).await
  }

  /// Resolve every input from `cwd`, reporting all failures at once. Entries must be files.
  fn resolve_entries(&self) -> BuildResult<Vec<(Option<ArcStr>, ResolvedId)>> {
    let mut entries = Vec::with_capacity(self.options.input.len());
    let mut errors = vec![];

    for InputItem { name, import } in &self.options.input {
      match resolve_id(&self.resolver, import, None, true) {
        Ok(resolved) if resolved.is_external => {
          errors.push(anyhow::anyhow!("Entry {import:?} resolved to {}, not a file", resolved.id));
        }
        Ok(resolved) => entries.push((name.as_deref().map(ArcStr::from), resolved)),
        Err(err) => errors
          .push(anyhow::Error::from(err).context(format!("Could not resolve entry {import:?}"))),
      }
    }

    if errors.is_empty() { Ok(entries) } else { Err(errors.into()) }
  }
}
