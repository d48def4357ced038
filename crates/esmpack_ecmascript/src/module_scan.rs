use arcstr::ArcStr;
use oxc::span::Span;

/// What the module graph needs to know about one source file.
#[derive(Debug, Default)]
pub struct ModuleScan {
  /// Static `import`/`export ... from` specifiers in source order.
  pub imports: Vec<ScannedImport>,
  pub has_export_declarations: bool,
}

#[derive(Debug, Clone)]
pub struct ScannedImport {
  pub specifier: ArcStr,
  /// Span of the specifier string literal, quotes included.
  pub span: Span,
  /// `export * from '...'` or `export { a } from '...'`.
  pub is_reexport: bool,
}
