use std::fmt::Debug;

use arcstr::ArcStr;
use oxc::span::Span;

use crate::{ImportKind, ModuleIdx};

pub type RawImportRecord = ImportRecord<Span>;
pub type ResolvedImportRecord = ImportRecord<ModuleIdx>;

/// A static dependency edge. Before resolution `state` is the span of the specifier in the importer
/// source, afterwards the index of the imported module in the graph.
#[derive(Debug)]
pub struct ImportRecord<State: Debug> {
  pub state: State,
  /// `./lib.js` in `import { foo } from './lib.js';`
  pub specifier: ArcStr,
  pub kind: ImportKind,
}

impl RawImportRecord {
  pub fn new(specifier: ArcStr, kind: ImportKind, span: Span) -> Self {
    Self { specifier, kind, state: span }
  }

  pub fn into_resolved(self, resolved_module: ModuleIdx) -> ResolvedImportRecord {
    ResolvedImportRecord { state: resolved_module, specifier: self.specifier, kind: self.kind }
  }
}

impl ResolvedImportRecord {
  pub fn resolved_module(&self) -> ModuleIdx {
    self.state
  }
}
