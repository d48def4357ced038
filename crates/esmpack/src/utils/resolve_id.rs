use std::path::Path;

use esmpack_common::{ResolutionResult, ResolvedId};
use esmpack_error::ResolveError;
use esmpack_resolver::{Resolver, SpecifierKind};

pub fn resolve_id(
  resolver: &Resolver,
  specifier: &str,
  importer: Option<&str>,
  is_user_defined_entry: bool,
) -> Result<ResolvedId, ResolveError> {
  let importer = importer.map(Path::new);
  let mut resolution = resolver.resolve_path(specifier, importer);

  // Handle `{ input: 'main.js' }` -> `<CWD>/main.js`
  if resolution.is_err()
    && is_user_defined_entry
    && matches!(SpecifierKind::classify(specifier), SpecifierKind::Bare)
  {
    let result = resolver.resolve_path(&format!("./{specifier}"), importer);
    if result.is_ok() {
      resolution = result;
    }
  }

  resolution.map(|ResolutionResult { location, format }| {
    // Files are keyed by path, everything else by URL.
    match location.to_file_path() {
      Ok(path) if location.scheme() == "file" => {
        ResolvedId { id: path.to_string_lossy().as_ref().into(), format, is_external: false }
      }
      _ => ResolvedId { id: location.as_str().into(), format, is_external: true },
    }
  })
}
