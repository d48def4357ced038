use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

/// `ModuleId` is the unique string identifier for each module: the canonical file path for files,
/// the URL for everything else (`node:fs`, `data:...`).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  /// Path relative to `cwd` with `/` separators, stable across machines.
  pub fn stabilize(&self, cwd: &Path) -> String {
    if self.as_path().is_absolute() {
      self.relative(cwd).as_path().to_slash_lossy().into_owned()
    } else {
      self.to_string()
    }
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

#[cfg(all(test, unix))]
#[test]
fn test_stabilize() {
  let cwd = Path::new("/proj");
  assert_eq!(ModuleId::new("/proj/src/index.js").stabilize(cwd), "src/index.js");
  assert_eq!(
    ModuleId::new("/proj/node_modules/pkg/lib.js").stabilize(cwd),
    "node_modules/pkg/lib.js"
  );
  assert_eq!(ModuleId::new("node:fs").stabilize(cwd), "node:fs");
}
