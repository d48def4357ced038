use std::fmt::Display;

use thiserror::Error;

/// Failures of the ESM resolution algorithm.
///
/// Each variant maps to exactly one class of rule violation and is never reused for another. The
/// payload is a human readable detail: the offending specifier, target or file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// Empty or malformed specifier, subpath ending in `/`, percent encoded separators in the
  /// resolved file URL, or a pattern match that escapes the package.
  #[error("Invalid module specifier {0:?}")]
  InvalidModuleSpecifier(String),
  #[error("Directory import {0:?} is not supported")]
  UnsupportedDirectoryImport(String),
  #[error("Cannot find module {0:?}")]
  ModuleNotFound(String),
  #[error("Package import specifier {0:?} is not defined")]
  PackageImportNotDefined(String),
  #[error("Package subpath {0:?} is not exported")]
  PackagePathNotExported(String),
  /// A target escapes the package, re-enters `node_modules`, is a bare specifier outside of
  /// `imports`, or has a shape no target may take.
  #[error("Invalid package target {0:?}")]
  InvalidPackageTarget(String),
  /// Unparsable `package.json`, `exports` mixing `.` and non `.` keys, numeric condition keys, or a
  /// pattern key with more than one `*`.
  #[error("Invalid package configuration {0:?}")]
  InvalidPackageConfiguration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
  InvalidModuleSpecifier,
  UnsupportedDirectoryImport,
  ModuleNotFound,
  PackageImportNotDefined,
  PackagePathNotExported,
  InvalidPackageTarget,
  InvalidPackageConfiguration,
}

impl ResolveError {
  pub fn kind(&self) -> ResolveErrorKind {
    match self {
      Self::InvalidModuleSpecifier(_) => ResolveErrorKind::InvalidModuleSpecifier,
      Self::UnsupportedDirectoryImport(_) => ResolveErrorKind::UnsupportedDirectoryImport,
      Self::ModuleNotFound(_) => ResolveErrorKind::ModuleNotFound,
      Self::PackageImportNotDefined(_) => ResolveErrorKind::PackageImportNotDefined,
      Self::PackagePathNotExported(_) => ResolveErrorKind::PackagePathNotExported,
      Self::InvalidPackageTarget(_) => ResolveErrorKind::InvalidPackageTarget,
      Self::InvalidPackageConfiguration(_) => ResolveErrorKind::InvalidPackageConfiguration,
    }
  }
}

impl Display for ResolveErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::InvalidModuleSpecifier => "ERR_INVALID_MODULE_SPECIFIER",
      Self::UnsupportedDirectoryImport => "ERR_UNSUPPORTED_DIR_IMPORT",
      Self::ModuleNotFound => "ERR_MODULE_NOT_FOUND",
      Self::PackageImportNotDefined => "ERR_PACKAGE_IMPORT_NOT_DEFINED",
      Self::PackagePathNotExported => "ERR_PACKAGE_PATH_NOT_EXPORTED",
      Self::InvalidPackageTarget => "ERR_INVALID_PACKAGE_TARGET",
      Self::InvalidPackageConfiguration => "ERR_INVALID_PACKAGE_CONFIG",
    };
    f.write_str(name)
  }
}

#[test]
fn test_kind_matches_variant() {
  let err = ResolveError::PackagePathNotExported("./secret".to_string());
  assert_eq!(err.kind(), ResolveErrorKind::PackagePathNotExported);
  assert_eq!(err.kind().to_string(), "ERR_PACKAGE_PATH_NOT_EXPORTED");
  assert_eq!(err.to_string(), r#"Package subpath "./secret" is not exported"#);
}

#[test]
fn test_build_error_from_resolve_error() {
  let err: crate::BuildError = ResolveError::ModuleNotFound("pkg".to_string()).into();
  assert_eq!(err.len(), 1);
  assert_eq!(err[0].to_string(), r#"Cannot find module "pkg""#);
}
