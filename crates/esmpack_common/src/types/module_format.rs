use std::fmt::Display;

/// How the runtime would load a resolved module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleFormat {
  /// `.mjs`, or `.js`/extensionless inside a `"type": "module"` scope.
  Module,
  /// `.cjs`, or `.js`/extensionless outside a `"type": "module"` scope.
  CommonJs,
  Json,
  /// A platform built-in such as `node:fs`.
  Builtin,
  /// Unknown until load time. Never guessed.
  Undefined,
}

impl ModuleFormat {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Module => "module",
      Self::CommonJs => "commonjs",
      Self::Json => "json",
      Self::Builtin => "builtin",
      Self::Undefined => "undefined",
    }
  }
}

impl Display for ModuleFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
