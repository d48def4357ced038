use std::path::Path;

use url::Url;

pub trait PathExt {
  /// `file:` URL of an absolute path.
  fn to_file_url(&self) -> Option<Url>;

  /// `file:` URL of an absolute directory path, with the trailing `/` that makes it a valid base
  /// for relative joins.
  fn to_dir_url(&self) -> Option<Url>;
}

impl PathExt for Path {
  fn to_file_url(&self) -> Option<Url> {
    Url::from_file_path(self).ok()
  }

  fn to_dir_url(&self) -> Option<Url> {
    Url::from_directory_path(self).ok()
  }
}
