use std::{fs, path::PathBuf};

use esmpack_fs::OsFileSystem;
use esmpack_resolver::{
  ConditionSet, ModuleFormat, Platform, ResolutionResult, ResolveError, ResolveErrorKind,
  ResolveOptions, Resolver,
};
use tempfile::TempDir;
use url::Url;

struct Fixture {
  _dir: TempDir,
  root: PathBuf,
}

impl Fixture {
  /// Paths ending in `/` become directories, everything else a file with the given content.
  fn new(files: &[(&str, &str)]) -> Self {
    let dir = tempfile::tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    for (path, content) in files {
      let path = root.join(path);
      if path.to_string_lossy().ends_with('/') {
        fs::create_dir_all(&path).unwrap();
      } else {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
      }
    }
    Self { _dir: dir, root }
  }

  fn url(&self, path: &str) -> Url {
    Url::from_file_path(self.root.join(path)).unwrap()
  }

  fn resolver(&self) -> Resolver {
    self.resolver_with(ResolveOptions::default())
  }

  fn resolver_with(&self, options: ResolveOptions) -> Resolver {
    Resolver::new(&options, self.root.clone(), OsFileSystem)
  }

  fn resolve(&self, specifier: &str, parent: &str) -> Result<ResolutionResult, ResolveError> {
    self.resolver().resolve(specifier, &self.url(parent))
  }

  fn resolve_err(&self, specifier: &str, parent: &str) -> ResolveErrorKind {
    match self.resolve(specifier, parent) {
      Ok(resolved) => panic!("{specifier} unexpectedly resolved to {}", resolved.location),
      Err(err) => err.kind(),
    }
  }
}

#[test]
fn test_relative_import_in_module_scope() {
  let fixture = Fixture::new(&[
    ("package.json", r#"{ "type": "module" }"#),
    ("src/index.js", ""),
    ("src/util.js", ""),
  ]);
  let resolved = fixture.resolve("./util.js", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("src/util.js"));
  assert_eq!(resolved.format, ModuleFormat::Module);
}

#[test]
fn test_package_main_without_exports() {
  let fixture = Fixture::new(&[
    ("src/index.js", ""),
    ("node_modules/pkg/package.json", r#"{ "main": "lib.js" }"#),
    ("node_modules/pkg/lib.js", ""),
  ]);
  let resolved = fixture.resolve("pkg", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/lib.js"));
  assert_eq!(resolved.format, ModuleFormat::CommonJs);
}

#[test]
fn test_subpath_pattern_exports() {
  let fixture = Fixture::new(&[
    ("src/index.js", ""),
    ("node_modules/pkg/package.json", r#"{ "exports": { "./feature/*.js": "./src/*.js" } }"#),
    ("node_modules/pkg/src/x.js", ""),
  ]);
  let resolved = fixture.resolve("pkg/feature/x.js", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/src/x.js"));

  assert_eq!(
    fixture.resolve_err("pkg/feature/x", "src/index.js"),
    ResolveErrorKind::PackagePathNotExported
  );
  assert_eq!(
    fixture.resolve_err("pkg/other", "src/index.js"),
    ResolveErrorKind::PackagePathNotExported
  );
}

#[test]
fn test_resolution_is_idempotent() {
  let fixture = Fixture::new(&[
    ("src/index.js", ""),
    ("node_modules/pkg/package.json", r#"{ "exports": "./index.js" }"#),
    ("node_modules/pkg/index.js", ""),
  ]);
  let resolver = fixture.resolver();
  let parent = fixture.url("src/index.js");
  let first = resolver.resolve("pkg", &parent).unwrap();
  let second = resolver.resolve("pkg", &parent).unwrap();
  assert_eq!(first, second);
}

#[test]
fn test_most_specific_pattern_wins() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{ "exports": { "./dir/*": "./generic/*", "./dir/sub/*": "./specific/*" } }"#,
    ),
    ("node_modules/pkg/generic/sub/x.js", ""),
    ("node_modules/pkg/specific/x.js", ""),
  ]);
  let resolved = fixture.resolve("pkg/dir/sub/x.js", "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/specific/x.js"));
}

#[test]
fn test_null_target_is_not_exported() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{ "main": "secret.js", "exports": { ".": "./index.js", "./secret": null } }"#,
    ),
    ("node_modules/pkg/index.js", ""),
    ("node_modules/pkg/secret.js", ""),
  ]);
  assert_eq!(
    fixture.resolve_err("pkg/secret", "index.js"),
    ResolveErrorKind::PackagePathNotExported
  );
}

#[test]
fn test_conditions_follow_declaration_order() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{ "exports": { ".": { "import": "./esm/index.js", "default": "./cjs/index.js" } } }"#,
    ),
    ("node_modules/pkg/esm/index.js", ""),
    ("node_modules/pkg/cjs/index.js", ""),
  ]);
  let resolved = fixture.resolve("pkg", "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/esm/index.js"));

  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{ "exports": { "default": "./cjs/index.js", "import": "./esm/index.js" } }"#,
    ),
    ("node_modules/pkg/esm/index.js", ""),
    ("node_modules/pkg/cjs/index.js", ""),
  ]);
  let resolved = fixture.resolve("pkg", "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/cjs/index.js"));
}

#[test]
fn test_platform_and_user_conditions() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{
        "exports": { "development": "./dev.js", "browser": "./browser.js", "node": "./node.js" }
      }"#,
    ),
    ("node_modules/pkg/dev.js", ""),
    ("node_modules/pkg/browser.js", ""),
    ("node_modules/pkg/node.js", ""),
  ]);
  let parent = fixture.url("index.js");

  let resolved = fixture.resolver().resolve("pkg", &parent).unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/node.js"));

  let resolver =
    fixture.resolver_with(ResolveOptions { platform: Platform::Browser, conditions: vec![] });
  let resolved = resolver.resolve("pkg", &parent).unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/browser.js"));

  let resolver = fixture.resolver_with(ResolveOptions {
    platform: Platform::Node,
    conditions: vec!["development".to_string()],
  });
  let resolved = resolver.resolve("pkg", &parent).unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/dev.js"));
}

#[test]
fn test_explicit_condition_set() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{ "exports": { "require": "./cjs.js", "import": "./esm.js" } }"#,
    ),
    ("node_modules/pkg/cjs.js", ""),
    ("node_modules/pkg/esm.js", ""),
  ]);
  let resolver = fixture.resolver();
  let parent = fixture.url("index.js");

  let conditions = ConditionSet::from_iter(["require", "node"]);
  let resolved = resolver.resolve_with_conditions("pkg", &parent, &conditions).unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/cjs.js"));

  let resolved = resolver.resolve("pkg", &parent).unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/esm.js"));
}

#[test]
fn test_traversal_targets_are_rejected() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{
        "exports": {
          "./passwd": "../../etc/passwd",
          "./nested": "./node_modules/x.js",
          "./encoded": "./%2e%2e/x.js",
          "./pattern/*": "./node_modules/*",
          "./bare": "dep"
        }
      }"#,
    ),
    ("node_modules/pkg/node_modules/x.js", ""),
  ]);
  for specifier in ["pkg/passwd", "pkg/nested", "pkg/encoded", "pkg/pattern/x.js", "pkg/bare"] {
    assert_eq!(
      fixture.resolve_err(specifier, "index.js"),
      ResolveErrorKind::InvalidPackageTarget,
      "{specifier}"
    );
  }
}

#[test]
fn test_pattern_capture_may_not_escape_the_package() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    ("node_modules/pkg/package.json", r#"{ "exports": { "./*": "./src/*" } }"#),
    ("node_modules/pkg/secret.js", ""),
  ]);
  assert_eq!(
    fixture.resolve_err("pkg/../secret.js", "index.js"),
    ResolveErrorKind::InvalidModuleSpecifier
  );
  assert_eq!(
    fixture.resolve_err("pkg/a/node_modules/b.js", "index.js"),
    ResolveErrorKind::InvalidModuleSpecifier
  );
}

#[test]
fn test_directory_imports_are_rejected() {
  let fixture = Fixture::new(&[
    ("src/index.js", ""),
    ("src/lib/", ""),
    ("node_modules/pkg/package.json", r#"{ "exports": { "./dir": "./lib" } }"#),
    ("node_modules/pkg/lib/", ""),
  ]);
  assert_eq!(
    fixture.resolve_err("pkg/dir", "src/index.js"),
    ResolveErrorKind::UnsupportedDirectoryImport
  );
  assert_eq!(
    fixture.resolve_err("./lib", "src/index.js"),
    ResolveErrorKind::UnsupportedDirectoryImport
  );
}

#[test]
fn test_missing_modules() {
  let fixture = Fixture::new(&[("src/index.js", "")]);
  assert_eq!(fixture.resolve_err("./missing.js", "src/index.js"), ResolveErrorKind::ModuleNotFound);
  assert_eq!(fixture.resolve_err("missing-pkg", "src/index.js"), ResolveErrorKind::ModuleNotFound);
}

#[test]
fn test_encoded_separators_are_rejected() {
  let fixture = Fixture::new(&[("src/index.js", ""), ("src/a/b.js", "")]);
  assert_eq!(
    fixture.resolve_err("./a%2Fb.js", "src/index.js"),
    ResolveErrorKind::InvalidModuleSpecifier
  );
  assert_eq!(
    fixture.resolve_err("./a%5cb.js", "src/index.js"),
    ResolveErrorKind::InvalidModuleSpecifier
  );
}

#[test]
fn test_invalid_package_names() {
  let fixture = Fixture::new(&[("index.js", "")]);
  for specifier in ["@scope", "pkg/", "pk%20g"] {
    assert_eq!(
      fixture.resolve_err(specifier, "index.js"),
      ResolveErrorKind::InvalidModuleSpecifier,
      "{specifier}"
    );
  }
}

#[test]
fn test_invalid_package_configurations() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/mixed/package.json",
      r#"{ "exports": { ".": "./index.js", "import": "./a.js" } }"#,
    ),
    (
      "node_modules/numeric/package.json",
      r#"{ "exports": { "0": "./a.js", "default": "./a.js" } }"#,
    ),
    ("node_modules/stars/package.json", r#"{ "exports": { "./*/*": "./a.js" } }"#),
    ("node_modules/broken/package.json", r#"{ "exports": "#),
  ]);
  for specifier in ["mixed", "numeric", "stars/a/b", "broken"] {
    assert_eq!(
      fixture.resolve_err(specifier, "index.js"),
      ResolveErrorKind::InvalidPackageConfiguration,
      "{specifier}"
    );
  }
}

#[test]
fn test_target_list_falls_back() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{
        "exports": {
          ".": ["https://cdn.example.com/pkg.js", false, { "worker": "./worker.js" }, "./index.js"],
          "./none": [null, 1]
        }
      }"#,
    ),
    ("node_modules/pkg/index.js", ""),
  ]);
  let resolved = fixture.resolve("pkg", "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/index.js"));
  assert_eq!(fixture.resolve_err("pkg/none", "index.js"), ResolveErrorKind::PackagePathNotExported);
}

#[test]
fn test_target_list_stops_at_configuration_errors() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    ("node_modules/pkg/package.json", r#"{ "exports": [{ "0": "./a.js" }, "./index.js"] }"#),
    ("node_modules/pkg/a.js", ""),
    ("node_modules/pkg/index.js", ""),
  ]);
  assert_eq!(fixture.resolve_err("pkg", "index.js"), ResolveErrorKind::InvalidPackageConfiguration);
}

#[test]
fn test_nested_conditions_fall_through() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{ "exports": { "import": { "worker": "./w.js" }, "default": "./d.js" } }"#,
    ),
    ("node_modules/pkg/w.js", ""),
    ("node_modules/pkg/d.js", ""),
  ]);
  let resolved = fixture.resolve("pkg", "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/d.js"));
}

#[test]
fn test_first_matching_pattern_decides() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    (
      "node_modules/pkg/package.json",
      r#"{ "exports": { "./dir/sub/*": null, "./dir/*": "./x/*" } }"#,
    ),
    ("node_modules/pkg/x/sub/a.js", ""),
    ("node_modules/pkg/x/a.js", ""),
  ]);
  assert_eq!(
    fixture.resolve_err("pkg/dir/sub/a.js", "index.js"),
    ResolveErrorKind::PackagePathNotExported
  );
  let resolved = fixture.resolve("pkg/dir/a.js", "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/pkg/x/a.js"));
}

#[test]
fn test_exports_sugar_only_exports_the_root() {
  let fixture = Fixture::new(&[
    ("index.js", ""),
    ("node_modules/pkg/package.json", r#"{ "exports": { "import": "./index.js" } }"#),
    ("node_modules/pkg/index.js", ""),
    ("node_modules/pkg/other.js", ""),
  ]);
  assert!(fixture.resolve("pkg", "index.js").is_ok());
  assert_eq!(
    fixture.resolve_err("pkg/other.js", "index.js"),
    ResolveErrorKind::PackagePathNotExported
  );
}

#[test]
fn test_subpath_without_exports_resolves_inside_package() {
  let fixture = Fixture::new(&[
    ("src/index.js", ""),
    ("node_modules/@scope/pkg/package.json", r#"{ "type": "module" }"#),
    ("node_modules/@scope/pkg/feature.js", ""),
    ("node_modules/bare/index.js", ""),
  ]);
  let resolved = fixture.resolve("@scope/pkg/feature.js", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/@scope/pkg/feature.js"));
  assert_eq!(resolved.format, ModuleFormat::Module);

  let resolved = fixture.resolve("bare/index.js", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/bare/index.js"));
}

#[test]
fn test_nearest_node_modules_wins() {
  let fixture = Fixture::new(&[
    ("packages/app/index.js", ""),
    ("packages/app/node_modules/pkg/index.js", ""),
    ("node_modules/pkg/index.js", ""),
    ("node_modules/other/index.js", ""),
  ]);
  let resolved = fixture.resolve("pkg/index.js", "packages/app/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("packages/app/node_modules/pkg/index.js"));
  let resolved = fixture.resolve("other/index.js", "packages/app/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/other/index.js"));
}

#[test]
fn test_self_reference() {
  let fixture = Fixture::new(&[
    (
      "package.json",
      r#"{
        "name": "app",
        "type": "module",
        "exports": { ".": "./src/index.js", "./util": "./src/util.js" }
      }"#,
    ),
    ("src/index.js", ""),
    ("src/util.js", ""),
  ]);
  let resolved = fixture.resolve("app/util", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("src/util.js"));
  assert_eq!(resolved.format, ModuleFormat::Module);
  assert_eq!(
    fixture.resolve_err("app/private", "src/index.js"),
    ResolveErrorKind::PackagePathNotExported
  );
}

#[test]
fn test_subpath_imports() {
  let fixture = Fixture::new(&[
    (
      "package.json",
      r##"{
        "imports": {
          "#internal/*": "./src/internal/*.js",
          "#dep": "dep",
          "#escape": "dep/../../secret.js",
          "#platform": { "browser": "./src/browser.js", "default": "./src/default.js" }
        }
      }"##,
    ),
    ("src/index.js", ""),
    ("src/internal/a.js", ""),
    ("src/default.js", ""),
    ("node_modules/dep/package.json", r#"{ "exports": "./main.js" }"#),
    ("node_modules/dep/main.js", ""),
    ("secret.js", ""),
  ]);
  let resolved = fixture.resolve("#internal/a", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("src/internal/a.js"));

  let resolved = fixture.resolve("#dep", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("node_modules/dep/main.js"));

  let resolved = fixture.resolve("#platform", "src/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("src/default.js"));

  assert_eq!(fixture.resolve_err("#", "src/index.js"), ResolveErrorKind::InvalidModuleSpecifier);
  assert_eq!(fixture.resolve_err("#/a", "src/index.js"), ResolveErrorKind::InvalidModuleSpecifier);
  assert_eq!(
    fixture.resolve_err("#missing", "src/index.js"),
    ResolveErrorKind::PackageImportNotDefined
  );
  assert_eq!(
    fixture.resolve_err("#escape", "src/index.js"),
    ResolveErrorKind::InvalidPackageTarget
  );
}

#[test]
fn test_subpath_imports_without_package_json() {
  let fixture = Fixture::new(&[("src/index.js", "")]);
  assert_eq!(
    fixture.resolve_err("#dep", "src/index.js"),
    ResolveErrorKind::PackageImportNotDefined
  );
}

#[test]
fn test_builtin_modules() {
  let fixture = Fixture::new(&[("index.js", "")]);
  for specifier in ["fs", "node:fs"] {
    let resolved = fixture.resolve(specifier, "index.js").unwrap();
    assert_eq!(resolved.location.as_str(), "node:fs");
    assert_eq!(resolved.format, ModuleFormat::Builtin);
  }
  let resolved = fixture.resolve("fs/promises", "index.js").unwrap();
  assert_eq!(resolved.location.as_str(), "node:fs/promises");

  let resolver =
    fixture.resolver_with(ResolveOptions { platform: Platform::Browser, conditions: vec![] });
  let err = resolver.resolve("fs", &fixture.url("index.js")).unwrap_err();
  assert_eq!(err.kind(), ResolveErrorKind::ModuleNotFound);
}

#[test]
fn test_url_specifiers() {
  let fixture = Fixture::new(&[("index.js", ""), ("lib/a.mjs", "")]);
  let resolved = fixture.resolve(fixture.url("lib/a.mjs").as_str(), "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("lib/a.mjs"));
  assert_eq!(resolved.format, ModuleFormat::Module);

  let resolved = fixture.resolve("data:text/javascript,export default 1", "index.js").unwrap();
  assert_eq!(resolved.format, ModuleFormat::Module);

  let resolved = fixture.resolve("file:a.mjs", "lib/index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("lib/a.mjs"));
}

#[test]
fn test_format_by_extension_and_scope() {
  let fixture = Fixture::new(&[
    ("package.json", r#"{ "type": "module" }"#),
    ("index.js", ""),
    ("a.cjs", ""),
    ("b.json", "{}"),
    ("bin/cli", ""),
    ("c.ts", ""),
    ("legacy/package.json", r#"{ "type": "commonjs" }"#),
    ("legacy/d.js", ""),
    ("legacy/e.mjs", ""),
  ]);
  let format = |specifier: &str| fixture.resolve(specifier, "index.js").unwrap().format;
  assert_eq!(format("./index.js"), ModuleFormat::Module);
  assert_eq!(format("./a.cjs"), ModuleFormat::CommonJs);
  assert_eq!(format("./b.json"), ModuleFormat::Json);
  assert_eq!(format("./bin/cli"), ModuleFormat::Module);
  assert_eq!(format("./c.ts"), ModuleFormat::Undefined);
  assert_eq!(format("./legacy/d.js"), ModuleFormat::CommonJs);
  assert_eq!(format("./legacy/e.mjs"), ModuleFormat::Module);
}

#[test]
fn test_query_and_fragment_are_kept() {
  let fixture = Fixture::new(&[("index.js", ""), ("util.js", "")]);
  let resolved = fixture.resolve("./util.js?v=1#top", "index.js").unwrap();
  assert_eq!(resolved.location.query(), Some("v=1"));
  assert_eq!(resolved.location.fragment(), Some("top"));
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_canonicalized() {
  let fixture =
    Fixture::new(&[("index.js", ""), ("packages/real/index.js", ""), ("node_modules/", "")]);
  let root = &fixture.root;
  std::os::unix::fs::symlink(root.join("packages/real"), root.join("node_modules/linked")).unwrap();
  let resolved = fixture.resolve("linked/index.js", "index.js").unwrap();
  assert_eq!(resolved.location, fixture.url("packages/real/index.js"));
}

#[test]
fn test_clear_cache_rereads_package_json() {
  let fixture = Fixture::new(&[("package.json", r#"{ "type": "module" }"#), ("index.js", "")]);
  let resolver = fixture.resolver();
  let parent = fixture.url("index.js");
  assert_eq!(resolver.resolve("./index.js", &parent).unwrap().format, ModuleFormat::Module);

  fs::write(fixture.root.join("package.json"), r#"{ "type": "commonjs" }"#).unwrap();
  assert_eq!(resolver.resolve("./index.js", &parent).unwrap().format, ModuleFormat::Module);

  resolver.clear_cache();
  assert_eq!(resolver.resolve("./index.js", &parent).unwrap().format, ModuleFormat::CommonJs);
}

#[test]
fn test_resolve_path_uses_importer_or_cwd() {
  let fixture = Fixture::new(&[("src/index.js", ""), ("src/util.js", ""), ("main.js", "")]);
  let resolver = fixture.resolver();

  let resolved = resolver.resolve_path("./main.js", None).unwrap();
  assert_eq!(resolved.location, fixture.url("main.js"));

  let importer = fixture.root.join("src/index.js");
  let resolved = resolver.resolve_path("./util.js", Some(&importer)).unwrap();
  assert_eq!(resolved.location, fixture.url("src/util.js"));

  let err =
    resolver.resolve_path("./util.js", Some(std::path::Path::new("src/index.js"))).unwrap_err();
  assert_eq!(err.kind(), ResolveErrorKind::ModuleNotFound);
}
