use std::path::PathBuf;

use crate::{InputItem, Platform};

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
  pub platform: Platform,
}
