use std::fmt::Display;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ImportKind {
  /// import foo from 'foo'
  Import,
  /// export { foo } from 'foo'
  ExportFrom,
}

impl Display for ImportKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Import => write!(f, "import-statement"),
      Self::ExportFrom => write!(f, "export-from"),
    }
  }
}
