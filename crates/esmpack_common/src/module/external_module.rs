use arcstr::ArcStr;

use crate::{ModuleFormat, ModuleIdx};

/// A module that is part of the graph but not loaded: platform built-ins and data URLs.
#[derive(Debug)]
pub struct ExternalModule {
  pub idx: ModuleIdx,
  pub name: ArcStr,
  pub format: ModuleFormat,
}

impl ExternalModule {
  pub fn new(idx: ModuleIdx, name: ArcStr, format: ModuleFormat) -> Self {
    Self { idx, name, format }
  }
}
