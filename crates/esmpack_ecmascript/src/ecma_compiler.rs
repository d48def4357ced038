use arcstr::ArcStr;
use esmpack_error::BuildResult;
use oxc::{
  allocator::Allocator,
  ast::ast::{ModuleDeclaration, StringLiteral},
  parser::Parser,
  span::SourceType,
};

use crate::{ModuleScan, ScannedImport};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parse `source` and collect its static module dependencies. Type-only imports and exports are
  /// skipped.
  pub fn scan(source: &str, source_type: SourceType) -> BuildResult<ModuleScan> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
      Err(anyhow::anyhow!("{:?}", ret.errors))?;
    }

    let mut scan = ModuleScan::default();
    for decl in ret.program.body.iter().filter_map(|stmt| stmt.as_module_declaration()) {
      match decl {
        ModuleDeclaration::ImportDeclaration(decl) => {
          if !decl.import_kind.is_type() {
            scan.imports.push(scanned_import(&decl.source, false));
          }
        }
        ModuleDeclaration::ExportAllDeclaration(decl) => {
          scan.has_export_declarations = true;
          if !decl.export_kind.is_type() {
            scan.imports.push(scanned_import(&decl.source, true));
          }
        }
        ModuleDeclaration::ExportNamedDeclaration(decl) => {
          scan.has_export_declarations = true;
          if let Some(source) = decl.source.as_ref().filter(|_| !decl.export_kind.is_type()) {
            scan.imports.push(scanned_import(source, true));
          }
        }
        ModuleDeclaration::ExportDefaultDeclaration(_)
        | ModuleDeclaration::TSExportAssignment(_) => {
          scan.has_export_declarations = true;
        }
        ModuleDeclaration::TSNamespaceExportDeclaration(_) => {}
      }
    }

    Ok(scan)
  }
}

fn scanned_import(source: &StringLiteral, is_reexport: bool) -> ScannedImport {
  ScannedImport { specifier: ArcStr::from(source.value.as_str()), span: source.span, is_reexport }
}
