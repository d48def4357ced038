use esmpack_common::{ModuleFormat, PackageType};
use esmpack_error::ResolveError;
use esmpack_fs::FileSystem;
use esmpack_utils::url_ext::UrlExt;
use url::Url;

use crate::Resolver;

impl<F: FileSystem> Resolver<F> {
  /// The format a runtime would load `location` as.
  ///
  /// Files are judged by extension, falling back to the `type` of the enclosing `package.json` for
  /// `.js` and extensionless files. Other locations are judged by scheme.
  pub fn classify_format(&self, location: &Url) -> Result<ModuleFormat, ResolveError> {
    if !location.is_file_url() {
      return Ok(format_from_scheme(location));
    }

    let format = match location.extension() {
      Some("mjs") => ModuleFormat::Module,
      Some("cjs") => ModuleFormat::CommonJs,
      Some("json") => ModuleFormat::Json,
      Some("js") | None => match self.package_type(location)? {
        Some(PackageType::Module) => ModuleFormat::Module,
        Some(PackageType::CommonJs) | None => ModuleFormat::CommonJs,
      },
      Some(_) => ModuleFormat::Undefined,
    };
    Ok(format)
  }

  fn package_type(&self, location: &Url) -> Result<Option<PackageType>, ResolveError> {
    let Some(dir) = location.dir_path() else { return Ok(None) };
    let package_json = self.package_json_store.find(&self.fs, &dir)?;
    Ok(package_json.and_then(|json| json.r#type()))
  }
}

fn format_from_scheme(location: &Url) -> ModuleFormat {
  match location.scheme() {
    "node" => ModuleFormat::Builtin,
    "data" => {
      let mime = location.path().split([',', ';']).next().unwrap_or_default();
      match mime.trim().to_ascii_lowercase().as_str() {
        "text/javascript" => ModuleFormat::Module,
        "application/json" => ModuleFormat::Json,
        _ => ModuleFormat::Undefined,
      }
    }
    _ => ModuleFormat::Undefined,
  }
}

#[test]
fn test_format_from_scheme() {
  let format = |url: &str| format_from_scheme(&Url::parse(url).unwrap());
  assert_eq!(format("node:fs"), ModuleFormat::Builtin);
  assert_eq!(format("data:text/javascript,export default 1"), ModuleFormat::Module);
  assert_eq!(format("data:application/json;base64,e30="), ModuleFormat::Json);
  assert_eq!(format("data:text/plain,hi"), ModuleFormat::Undefined);
  assert_eq!(format("https://example.com/a.js"), ModuleFormat::Undefined);
}
