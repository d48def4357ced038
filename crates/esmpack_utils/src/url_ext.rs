use std::path::{Path, PathBuf};

use url::Url;

pub trait UrlExt {
  fn is_file_url(&self) -> bool;

  /// Whether the path contains a percent encoded `/` or `\` (`%2F`, `%5C`, any case).
  fn has_encoded_separator(&self) -> bool;

  /// The last path segment, empty for URLs ending in `/`.
  fn file_name(&self) -> &str;

  /// Extension of the last path segment, without the leading `.`.
  fn extension(&self) -> Option<&str>;

  /// The directory a `file:` location lives in: the location itself when it ends in `/`, its
  /// parent otherwise.
  fn dir_path(&self) -> Option<PathBuf>;
}

impl UrlExt for Url {
  fn is_file_url(&self) -> bool {
    self.scheme() == "file"
  }

  fn has_encoded_separator(&self) -> bool {
    let path = self.path().to_ascii_lowercase();
    path.contains("%2f") || path.contains("%5c")
  }

  fn file_name(&self) -> &str {
    self.path().rsplit('/').next().unwrap_or_default()
  }

  fn extension(&self) -> Option<&str> {
    self.file_name().rsplit_once('.').map(|(_, ext)| ext)
  }

  fn dir_path(&self) -> Option<PathBuf> {
    let path = self.to_file_path().ok()?;
    if self.path().ends_with('/') { Some(path) } else { path.parent().map(Path::to_path_buf) }
  }
}

#[test]
fn test_encoded_separator() {
  let url = Url::parse("file:///proj/a%2Fb.js").unwrap();
  assert!(url.has_encoded_separator());
  let url = Url::parse("file:///proj/a%5cb.js").unwrap();
  assert!(url.has_encoded_separator());
  let url = Url::parse("file:///proj/a%20b.js").unwrap();
  assert!(!url.has_encoded_separator());
}

#[test]
fn test_extension() {
  let url = Url::parse("file:///proj/src/index.mjs").unwrap();
  assert_eq!(url.file_name(), "index.mjs");
  assert_eq!(url.extension(), Some("mjs"));

  let url = Url::parse("file:///proj/bin/cli").unwrap();
  assert_eq!(url.extension(), None);

  let url = Url::parse("file:///proj/v1.2/cli").unwrap();
  assert_eq!(url.extension(), None);
}

#[cfg(unix)]
#[test]
fn test_dir_path() {
  let url = Url::parse("file:///proj/src/index.js").unwrap();
  assert_eq!(url.dir_path().unwrap(), PathBuf::from("/proj/src"));

  let url = Url::parse("file:///proj/").unwrap();
  assert_eq!(url.dir_path().unwrap(), PathBuf::from("/proj"));

  assert!(Url::parse("node:fs").unwrap().dir_path().is_none());
}
