use std::path::Path;

use esmpack_common::{ConditionSet, Target};
use esmpack_error::ResolveError;
use esmpack_fs::FileSystem;
use esmpack_utils::{indexmap::FxIndexMap, path_ext::PathExt, url_ext::UrlExt};
use tracing::trace;
use url::Url;

use crate::{
  pattern::{match_pattern, PatternMatch},
  target::TargetResult,
  Resolver,
};

impl<F: FileSystem> Resolver<F> {
  /// Resolve a bare specifier (`pkg`, `pkg/sub`, `@scope/pkg/sub`) imported from `parent`.
  pub(crate) fn package_resolve(
    &self,
    specifier: &str,
    parent: &Url,
    conditions: &ConditionSet,
  ) -> Result<Url, ResolveError> {
    if specifier.is_empty() {
      return Err(ResolveError::InvalidModuleSpecifier(String::new()));
    }

    if self.is_builtin(specifier) {
      return Url::parse(&format!("node:{specifier}"))
        .map_err(|_| ResolveError::InvalidModuleSpecifier(specifier.to_string()));
    }

    let (package_name, package_subpath) = parse_package_specifier(specifier)?;

    if let Some(resolved) =
      self.package_self_resolve(package_name, &package_subpath, parent, conditions)?
    {
      return Ok(resolved);
    }

    let Some(dir) = parent.dir_path() else {
      return Err(ResolveError::ModuleNotFound(format!("{specifier} imported from {parent}")));
    };

    for ancestor in dir.ancestors() {
      let package_dir = ancestor.join("node_modules").join(package_name);
      if !self.fs.is_dir(&package_dir) {
        continue;
      }
      trace!(package = package_name, dir = %package_dir.display(), "found package");

      let package_url = dir_url(&package_dir)?;
      let package_json = self.package_json_store.read(&self.fs, &package_dir)?;
      let Some(package_json) = package_json else {
        return join(&package_url, &package_subpath);
      };

      if let Some(exports) = &package_json.exports {
        return self.package_exports_resolve(&package_url, &package_subpath, exports, conditions);
      }
      if package_subpath == "." {
        if let Some(main) = &package_json.main {
          return join(&package_url, main);
        }
      }
      return join(&package_url, &package_subpath);
    }

    Err(ResolveError::ModuleNotFound(format!("{specifier} imported from {parent}")))
  }

  /// A package importing itself by name through its own `exports`.
  fn package_self_resolve(
    &self,
    package_name: &str,
    package_subpath: &str,
    parent: &Url,
    conditions: &ConditionSet,
  ) -> TargetResult {
    let Some(dir) = parent.dir_path() else { return Ok(None) };
    let Some(scope) = self.package_json_store.lookup_scope(&self.fs, &dir) else {
      return Ok(None);
    };
    let Some(package_json) = self.package_json_store.read(&self.fs, &scope)? else {
      return Ok(None);
    };
    let Some(exports) = &package_json.exports else { return Ok(None) };
    if package_json.name.as_deref() != Some(package_name) {
      return Ok(None);
    }

    trace!(package = package_name, "self reference");
    let package_url = dir_url(&scope)?;
    self.package_exports_resolve(&package_url, package_subpath, exports, conditions).map(Some)
  }

  pub(crate) fn package_exports_resolve(
    &self,
    package_url: &Url,
    subpath: &str,
    exports: &Target,
    conditions: &ConditionSet,
  ) -> Result<Url, ResolveError> {
    let exports_map = exports.as_conditional();
    let is_subpath_map = match exports_map {
      Some(map) => {
        let dot_keys = map.keys().filter(|key| key.starts_with('.')).count();
        if dot_keys != 0 && dot_keys != map.len() {
          return Err(ResolveError::InvalidPackageConfiguration(format!(
            "{package_url}package.json \"exports\" cannot mix keys starting with '.' and others"
          )));
        }
        dot_keys != 0
      }
      None => false,
    };

    if subpath == "." {
      let main_export = match exports_map {
        Some(map) if is_subpath_map => map.get("."),
        Some(map) if map.is_empty() => None,
        _ => Some(exports),
      };
      if let Some(main_export) = main_export {
        if let Some(resolved) =
          self.resolve_target(package_url, main_export, None, false, conditions)?
        {
          return Ok(resolved);
        }
      }
    } else if let Some(map) = exports_map.filter(|_| is_subpath_map) {
      if let Some(resolved) =
        self.resolve_imports_exports(subpath, map, package_url, false, conditions)?
      {
        return Ok(resolved);
      }
    }

    Err(ResolveError::PackagePathNotExported(subpath.to_string()))
  }

  /// Resolve a `#` specifier through the `imports` of the package enclosing `parent`.
  pub(crate) fn package_imports_resolve(
    &self,
    specifier: &str,
    parent: &Url,
    conditions: &ConditionSet,
  ) -> Result<Url, ResolveError> {
    if specifier == "#" || specifier.starts_with("#/") {
      return Err(ResolveError::InvalidModuleSpecifier(format!(
        "{specifier} is not a valid internal imports specifier name"
      )));
    }

    if let Some(dir) = parent.dir_path() {
      if let Some(scope) = self.package_json_store.lookup_scope(&self.fs, &dir) {
        let package_json = self.package_json_store.read(&self.fs, &scope)?;
        if let Some(imports) = package_json.as_ref().and_then(|json| json.imports.as_ref()) {
          let package_url = dir_url(&scope)?;
          if let Some(resolved) =
            self.resolve_imports_exports(specifier, imports, &package_url, true, conditions)?
          {
            return Ok(resolved);
          }
        }
      }
    }

    Err(ResolveError::PackageImportNotDefined(format!("{specifier} imported from {parent}")))
  }

  /// Look `match_key` up in an `exports` subpath map or an `imports` map: an exact key first, then
  /// the most specific pattern.
  pub(crate) fn resolve_imports_exports(
    &self,
    match_key: &str,
    map: &FxIndexMap<String, Target>,
    package_url: &Url,
    is_imports: bool,
    conditions: &ConditionSet,
  ) -> TargetResult {
    if !match_key.contains('*') {
      if let Some(target) = map.get(match_key) {
        return self.resolve_target(package_url, target, None, is_imports, conditions);
      }
    }

    match match_pattern(match_key, map)? {
      Some(PatternMatch { target, captured }) => {
        trace!(match_key, captured, "matched pattern");
        self.resolve_target(package_url, target, Some(captured), is_imports, conditions)
      }
      None => Ok(None),
    }
  }
}

/// Split a bare specifier into its package name and the `.`-prefixed subpath inside it.
fn parse_package_specifier(specifier: &str) -> Result<(&str, String), ResolveError> {
  let invalid = || ResolveError::InvalidModuleSpecifier(specifier.to_string());

  let name_end = if specifier.starts_with('@') {
    let scope_end = specifier.find('/').ok_or_else(invalid)?;
    specifier[scope_end + 1..].find('/').map_or(specifier.len(), |i| scope_end + 1 + i)
  } else {
    specifier.find('/').unwrap_or(specifier.len())
  };

  let package_name = &specifier[..name_end];
  if package_name.starts_with('.') || package_name.contains('\\') || package_name.contains('%') {
    return Err(invalid());
  }

  let package_subpath = format!(".{}", &specifier[name_end..]);
  if package_subpath.ends_with('/') {
    return Err(invalid());
  }

  Ok((package_name, package_subpath))
}

fn dir_url(dir: &Path) -> Result<Url, ResolveError> {
  dir.to_dir_url().ok_or_else(|| ResolveError::ModuleNotFound(dir.display().to_string()))
}

fn join(package_url: &Url, path: &str) -> Result<Url, ResolveError> {
  package_url.join(path).map_err(|_| ResolveError::InvalidModuleSpecifier(path.to_string()))
}

#[test]
fn test_parse_package_specifier() {
  assert_eq!(parse_package_specifier("pkg").unwrap(), ("pkg", ".".to_string()));
  assert_eq!(parse_package_specifier("pkg/a/b.js").unwrap(), ("pkg", "./a/b.js".to_string()));
  assert_eq!(parse_package_specifier("@scope/pkg").unwrap(), ("@scope/pkg", ".".to_string()));
  assert_eq!(
    parse_package_specifier("@scope/pkg/feature").unwrap(),
    ("@scope/pkg", "./feature".to_string())
  );

  for specifier in ["@scope", ".pkg", "pk%20g", "pk\\g", "pkg/"] {
    let err = parse_package_specifier(specifier).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidModuleSpecifier(_)), "{specifier}");
  }
}
