use std::path::PathBuf;

use esmpack_utils::indexmap::FxIndexMap;
use serde_json::Value;

use crate::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
  Module,
  CommonJs,
}

/// The fields of a `package.json` that take part in resolution.
#[derive(Debug, Clone)]
pub struct PackageJson {
  /// Path of the `package.json` file itself.
  pub path: PathBuf,
  pub name: Option<String>,
  pub r#type: Option<PackageType>,
  pub main: Option<String>,
  pub exports: Option<Target>,
  pub imports: Option<FxIndexMap<String, Target>>,
}

impl PackageJson {
  pub fn new(path: PathBuf) -> Self {
    Self { path, name: None, r#type: None, main: None, exports: None, imports: None }
  }

  /// Fields of an unexpected JSON type are treated as absent, and unknown `type` values are
  /// ignored. Only text that is not a JSON object is an error.
  pub fn parse(path: PathBuf, source: &str) -> anyhow::Result<Self> {
    let Value::Object(mut json) = serde_json::from_str::<Value>(source)? else {
      anyhow::bail!("expected a JSON object");
    };

    let mut package_json = Self::new(path);
    package_json.name = json.remove("name").and_then(into_string);
    package_json.main = json.remove("main").and_then(into_string);
    package_json.r#type = match json.get("type").and_then(Value::as_str) {
      Some("module") => Some(PackageType::Module),
      Some("commonjs") => Some(PackageType::CommonJs),
      _ => None,
    };
    package_json.exports =
      json.remove("exports").filter(|value| !value.is_null()).map(Target::from);
    package_json.imports = match json.remove("imports") {
      Some(Value::Object(map)) => {
        Some(map.into_iter().map(|(key, value)| (key, Target::from(value))).collect())
      }
      _ => None,
    };

    Ok(package_json)
  }

  pub fn r#type(&self) -> Option<PackageType> {
    self.r#type
  }
}

fn into_string(value: Value) -> Option<String> {
  match value {
    Value::String(value) => Some(value),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_fields() {
    let source = r##"{
      "name": "pkg",
      "type": "module",
      "main": "lib.js",
      "exports": { ".": "./index.js" },
      "imports": { "#dep": "dep" }
    }"##;
    let package_json = PackageJson::parse(PathBuf::from("/pkg/package.json"), source).unwrap();
    assert_eq!(package_json.name.as_deref(), Some("pkg"));
    assert_eq!(package_json.r#type(), Some(PackageType::Module));
    assert_eq!(package_json.main.as_deref(), Some("lib.js"));
    assert!(package_json.exports.as_ref().and_then(Target::as_conditional).is_some());
    assert_eq!(package_json.imports.unwrap()["#dep"], Target::Literal("dep".to_string()));
  }

  #[test]
  fn test_unknown_fields_are_ignored() {
    let source = r#"{ "name": 1, "type": "wasm", "main": [], "imports": "./x.js" }"#;
    let package_json = PackageJson::parse(PathBuf::from("/pkg/package.json"), source).unwrap();
    assert!(package_json.name.is_none());
    assert!(package_json.r#type().is_none());
    assert!(package_json.main.is_none());
    assert!(package_json.imports.is_none());
  }

  #[test]
  fn test_exports_null_means_no_exports() {
    let source = r#"{ "exports": null, "main": "lib.js" }"#;
    let package_json = PackageJson::parse(PathBuf::from("/pkg/package.json"), source).unwrap();
    assert!(package_json.exports.is_none());
  }

  #[test]
  fn test_invalid_json() {
    let path = PathBuf::from("/pkg/package.json");
    assert!(PackageJson::parse(path.clone(), r#"{"name": "pkg", "version": "1.0.1}"#).is_err());
    assert!(PackageJson::parse(path, "[]").is_err());
  }
}
