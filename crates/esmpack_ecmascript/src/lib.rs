mod ecma_compiler;
mod module_scan;

pub use crate::{
  ecma_compiler::EcmaCompiler,
  module_scan::{ModuleScan, ScannedImport},
};

pub use oxc::span::SourceType;
