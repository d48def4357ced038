use std::{
  io,
  path::{Path, PathBuf},
};

/// The read-only file system surface the resolver and the module loader need.
///
/// Implementations must be shareable between module tasks.
pub trait FileSystem: Send + Sync {
  /// Whether anything (file or directory) exists at `path`, following symlinks.
  fn exists(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  /// Resolve symlinks and relative components into an absolute path.
  fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}
