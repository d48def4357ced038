use std::{
  fs, io,
  path::{Path, PathBuf},
};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn exists(&self, path: &Path) -> bool {
    fs::metadata(path).is_ok()
  }

  fn is_dir(&self, path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| metadata.is_dir())
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
    dunce::canonicalize(path)
  }
}
