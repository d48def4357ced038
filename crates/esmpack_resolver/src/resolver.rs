use std::path::{Path, PathBuf};

use esmpack_common::{ConditionSet, Platform, ResolutionResult, ResolveOptions};
use esmpack_error::ResolveError;
use esmpack_fs::{FileSystem, OsFileSystem};
use esmpack_utils::{path_ext::PathExt, url_ext::UrlExt};
use tracing::debug;
use url::Url;

use crate::{builtins::is_builtin_module, package_json_store::PackageJsonStore, SpecifierKind};

#[derive(Debug)]
pub struct Resolver<F: FileSystem = OsFileSystem> {
  pub(crate) cwd: PathBuf,
  pub(crate) fs: F,
  pub(crate) platform: Platform,
  pub(crate) conditions: ConditionSet,
  pub(crate) package_json_store: PackageJsonStore,
}

impl<F: FileSystem> Resolver<F> {
  pub fn new(options: &ResolveOptions, cwd: PathBuf, fs: F) -> Self {
    Self {
      cwd,
      fs,
      platform: options.platform,
      conditions: options.condition_set(),
      package_json_store: PackageJsonStore::default(),
    }
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }

  pub fn conditions(&self) -> &ConditionSet {
    &self.conditions
  }

  /// Forget every `package.json` read so far.
  pub fn clear_cache(&self) {
    self.package_json_store.clear();
  }

  pub(crate) fn is_builtin(&self, specifier: &str) -> bool {
    matches!(self.platform, Platform::Node) && is_builtin_module(specifier)
  }
}

impl<F: FileSystem> Resolver<F> {
  /// Resolve `specifier` as imported from the module at `parent`, with the conditions this resolver
  /// was created with.
  pub fn resolve(&self, specifier: &str, parent: &Url) -> Result<ResolutionResult, ResolveError> {
    self.resolve_with_conditions(specifier, parent, &self.conditions)
  }

  pub fn resolve_with_conditions(
    &self,
    specifier: &str,
    parent: &Url,
    conditions: &ConditionSet,
  ) -> Result<ResolutionResult, ResolveError> {
    let location = match SpecifierKind::classify(specifier) {
      // `file:util.js` is relative to the parent like `./util.js` is.
      SpecifierKind::Url | SpecifierKind::Path => parent
        .join(specifier)
        .map_err(|_| ResolveError::InvalidModuleSpecifier(specifier.to_string()))?,
      SpecifierKind::SubpathImport => {
        self.package_imports_resolve(specifier, parent, conditions)?
      }
      SpecifierKind::Bare => self.package_resolve(specifier, parent, conditions)?,
    };

    let resolved = self.finalize(location)?;
    debug!(
      specifier,
      parent = %parent,
      location = %resolved.location,
      format = %resolved.format,
      "resolved"
    );
    Ok(resolved)
  }

  /// [`Self::resolve`] for callers that think in paths: the parent is `importer`, or a module in
  /// `cwd` when there is none.
  pub fn resolve_path(
    &self,
    specifier: &str,
    importer: Option<&Path>,
  ) -> Result<ResolutionResult, ResolveError> {
    let parent = match importer {
      Some(importer) => importer.to_file_url(),
      None => self.cwd.to_dir_url(),
    };
    let Some(parent) = parent else {
      let importer = importer.unwrap_or(&self.cwd);
      return Err(ResolveError::ModuleNotFound(format!(
        "{specifier} (importer {} is not an absolute path)",
        importer.display()
      )));
    };
    self.resolve(specifier, &parent)
  }

  /// Checks a resolved location against the file system and attaches its format.
  fn finalize(&self, location: Url) -> Result<ResolutionResult, ResolveError> {
    if !location.is_file_url() {
      let format = self.classify_format(&location)?;
      return Ok(ResolutionResult { location, format });
    }

    if location.has_encoded_separator() {
      return Err(ResolveError::InvalidModuleSpecifier(format!(
        "{location} must not include encoded \"/\" or \"\\\" characters"
      )));
    }

    let path = location
      .to_file_path()
      .map_err(|()| ResolveError::InvalidModuleSpecifier(location.to_string()))?;
    if self.fs.is_dir(&path) {
      return Err(ResolveError::UnsupportedDirectoryImport(path.display().to_string()));
    }
    if !self.fs.exists(&path) {
      return Err(ResolveError::ModuleNotFound(path.display().to_string()));
    }

    let real_path = self
      .fs
      .canonicalize(&path)
      .map_err(|err| ResolveError::ModuleNotFound(format!("{}: {err}", path.display())))?;
    let mut real_location = real_path
      .to_file_url()
      .ok_or_else(|| ResolveError::ModuleNotFound(real_path.display().to_string()))?;
    real_location.set_query(location.query());
    real_location.set_fragment(location.fragment());

    let format = self.classify_format(&real_location)?;
    Ok(ResolutionResult { location: real_location, format })
  }
}
