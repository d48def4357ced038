/// URL schemes a specifier may start with to be taken as a URL as is.
const URL_SCHEMES: [&str; 3] = ["file:", "data:", "node:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
  /// `file:///a.js`, `data:text/javascript,...`, `node:fs`
  Url,
  /// `/a.js`, `./a.js`, `../a.js`
  Path,
  /// `#internal`
  SubpathImport,
  /// `pkg`, `pkg/sub`, `@scope/pkg/sub`
  Bare,
}

impl SpecifierKind {
  pub fn classify(specifier: &str) -> Self {
    if is_url_specifier(specifier) {
      Self::Url
    } else if ["/", "./", "../"].iter().any(|prefix| specifier.starts_with(prefix)) {
      Self::Path
    } else if specifier.starts_with('#') {
      Self::SubpathImport
    } else {
      Self::Bare
    }
  }
}

pub fn is_url_specifier(specifier: &str) -> bool {
  URL_SCHEMES.iter().any(|scheme| specifier.starts_with(scheme))
}

#[test]
fn test_classify() {
  assert_eq!(SpecifierKind::classify("file:///proj/a.js"), SpecifierKind::Url);
  assert_eq!(SpecifierKind::classify("data:text/javascript,export{}"), SpecifierKind::Url);
  assert_eq!(SpecifierKind::classify("node:fs"), SpecifierKind::Url);
  assert_eq!(SpecifierKind::classify("/proj/a.js"), SpecifierKind::Path);
  assert_eq!(SpecifierKind::classify("./a.js"), SpecifierKind::Path);
  assert_eq!(SpecifierKind::classify("../a.js"), SpecifierKind::Path);
  assert_eq!(SpecifierKind::classify("#internal/a.js"), SpecifierKind::SubpathImport);
  assert_eq!(SpecifierKind::classify("pkg/sub"), SpecifierKind::Bare);
  assert_eq!(SpecifierKind::classify("@scope/pkg"), SpecifierKind::Bare);
  assert_eq!(SpecifierKind::classify(".hidden"), SpecifierKind::Bare);
  assert_eq!(SpecifierKind::classify("http://example.com/a.js"), SpecifierKind::Bare);
}
