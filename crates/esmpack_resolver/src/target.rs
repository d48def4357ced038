use esmpack_common::{ConditionSet, Target};
use esmpack_error::ResolveError;
use esmpack_fs::FileSystem;
use percent_encoding::percent_decode_str;
use tracing::trace;
use url::Url;

use crate::Resolver;

/// `Ok(Some(_))` resolved, `Ok(None)` not applicable under the active conditions, `Err(_)` fatal.
pub(crate) type TargetResult = Result<Option<Url>, ResolveError>;

impl<F: FileSystem> Resolver<F> {
  /// Resolve one node of an `exports`/`imports` tree. `package_url` is the directory URL of the
  /// package owning the tree and `captured` what a `*` in the matched key stood for.
  pub(crate) fn resolve_target(
    &self,
    package_url: &Url,
    target: &Target,
    captured: Option<&str>,
    is_imports: bool,
    conditions: &ConditionSet,
  ) -> TargetResult {
    match target {
      Target::Literal(target) => self
        .resolve_target_string(package_url, target, captured, is_imports, conditions)
        .map(Some),
      Target::Conditional(map) => {
        if let Some(key) = map.keys().find(|key| is_array_index(key)) {
          return Err(ResolveError::InvalidPackageConfiguration(format!(
            "{package_url}package.json \"exports\" cannot contain numeric property key {key:?}"
          )));
        }
        for (condition, target) in map {
          if !conditions.matches(condition) {
            continue;
          }
          trace!(condition, "matched condition");
          if let Some(resolved) =
            self.resolve_target(package_url, target, captured, is_imports, conditions)?
          {
            return Ok(Some(resolved));
          }
        }
        Ok(None)
      }
      Target::List(targets) => {
        for target in targets {
          match self.resolve_target(package_url, target, captured, is_imports, conditions) {
            Ok(Some(resolved)) => return Ok(Some(resolved)),
            Ok(None) | Err(ResolveError::InvalidPackageTarget(_)) => {}
            Err(err) => return Err(err),
          }
        }
        Ok(None)
      }
      Target::Null => Ok(None),
      Target::Invalid(target) => Err(ResolveError::InvalidPackageTarget(target.clone())),
    }
  }

  fn resolve_target_string(
    &self,
    package_url: &Url,
    target: &str,
    captured: Option<&str>,
    is_imports: bool,
    conditions: &ConditionSet,
  ) -> Result<Url, ResolveError> {
    let Some(relative) = target.strip_prefix("./") else {
      // Only `imports` may map to another package, and never to a path or URL.
      if !is_imports
        || target.starts_with('/')
        || target.split(['/', '\\']).any(|segment| segment == "..")
        || Url::parse(target).is_ok()
      {
        return Err(ResolveError::InvalidPackageTarget(target.to_string()));
      }
      let specifier = captured.map_or_else(|| target.to_string(), |c| target.replace('*', c));
      trace!(target, specifier, "target re-enters package resolution");
      return self.package_resolve(&specifier, package_url, conditions);
    };

    if has_invalid_segment(relative) {
      return Err(ResolveError::InvalidPackageTarget(target.to_string()));
    }

    let target = match captured {
      Some(captured) if has_invalid_segment(captured) => {
        return Err(ResolveError::InvalidModuleSpecifier(format!(
          "{captured:?} is not a valid match in pattern {target:?} of {package_url}"
        )));
      }
      Some(captured) => target.replace('*', captured),
      None => target.to_string(),
    };

    package_url.join(&target).map_err(|_| ResolveError::InvalidPackageTarget(target))
  }
}

/// Whether any `/` or `\` separated segment is `.`, `..` or `node_modules`, after percent decoding
/// and ignoring case.
fn has_invalid_segment(path: &str) -> bool {
  path.split(['/', '\\']).any(|segment| {
    let segment = percent_decode_str(segment).decode_utf8_lossy().to_ascii_lowercase();
    matches!(segment.as_str(), "." | ".." | "node_modules")
  })
}

/// Canonical decimal integers up to `2^32 - 2`, the keys JSON objects treat as array indices.
fn is_array_index(key: &str) -> bool {
  if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
    return false;
  }
  key.bytes().all(|b| b.is_ascii_digit())
    && key.parse::<u64>().is_ok_and(|n| n < u64::from(u32::MAX))
}

#[test]
fn test_has_invalid_segment() {
  assert!(has_invalid_segment("../secret.js"));
  assert!(has_invalid_segment("dist/./a.js"));
  assert!(has_invalid_segment("dist\\..\\a.js"));
  assert!(has_invalid_segment("node_modules/dep/index.js"));
  assert!(has_invalid_segment("%2e%2E/secret.js"));
  assert!(has_invalid_segment("NODE_MODULES/dep.js"));
  assert!(!has_invalid_segment("dist/index.js"));
  assert!(!has_invalid_segment("dist/.hidden/a.js"));
  assert!(!has_invalid_segment("*"));
}

#[test]
fn test_is_array_index() {
  assert!(is_array_index("0"));
  assert!(is_array_index("42"));
  assert!(is_array_index("4294967294"));
  assert!(!is_array_index("4294967295"));
  assert!(!is_array_index("01"));
  assert!(!is_array_index("-1"));
  assert!(!is_array_index("import"));
  assert!(!is_array_index(""));
}
