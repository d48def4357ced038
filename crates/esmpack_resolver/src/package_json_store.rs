use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use dashmap::DashMap;
use esmpack_common::PackageJson;
use esmpack_error::ResolveError;
use esmpack_fs::FileSystem;
use tracing::debug;

/// Finds and caches the `package.json` that owns a directory.
///
/// Absence is cached too, so a miss is only probed once per directory until [`Self::clear`].
#[derive(Debug, Default)]
pub struct PackageJsonStore {
  cache: DashMap<PathBuf, Option<Arc<PackageJson>>>,
}

impl PackageJsonStore {
  /// The nearest directory, starting at `dir` itself, that contains a `package.json`.
  ///
  /// Returns `None` on reaching a directory named `node_modules` or the filesystem root.
  pub fn lookup_scope<F: FileSystem>(&self, fs: &F, dir: &Path) -> Option<PathBuf> {
    for scope in dir.ancestors() {
      if scope.file_name().is_some_and(|name| name == "node_modules") {
        return None;
      }
      let found = match self.cache.get(scope) {
        Some(entry) => entry.is_some(),
        None => fs.exists(&scope.join("package.json")),
      };
      if found {
        return Some(scope.to_path_buf());
      }
    }
    None
  }

  /// The `package.json` located exactly in `scope`.
  pub fn read<F: FileSystem>(
    &self,
    fs: &F,
    scope: &Path,
  ) -> Result<Option<Arc<PackageJson>>, ResolveError> {
    if let Some(cached) = self.cache.get(scope) {
      return Ok(cached.clone());
    }

    let path = scope.join("package.json");
    let package_json = if fs.exists(&path) {
      let source = fs.read_to_string(&path).map_err(|err| {
        ResolveError::InvalidPackageConfiguration(format!("{}: {err}", path.display()))
      })?;
      let package_json = PackageJson::parse(path.clone(), &source).map_err(|err| {
        ResolveError::InvalidPackageConfiguration(format!("{}: {err}", path.display()))
      })?;
      debug!(path = %path.display(), name = ?package_json.name, "read package.json");
      Some(Arc::new(package_json))
    } else {
      None
    };

    Ok(self.cache.entry(scope.to_path_buf()).or_insert(package_json).clone())
  }

  /// [`Self::lookup_scope`] followed by [`Self::read`].
  pub fn find<F: FileSystem>(
    &self,
    fs: &F,
    dir: &Path,
  ) -> Result<Option<Arc<PackageJson>>, ResolveError> {
    match self.lookup_scope(fs, dir) {
      Some(scope) => self.read(fs, &scope),
      None => Ok(None),
    }
  }

  pub fn clear(&self) {
    self.cache.clear();
  }
}
