pub mod input_item;
pub mod normalized_bundler_options;
pub mod platform;
pub mod resolve_options;

use std::path::PathBuf;

use crate::{InputItem, Platform};

#[derive(Default, Debug, Clone)]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,
  pub platform: Option<Platform>,

  // --- Resolve
  /// Extra condition names, matched after `import` and the platform condition.
  pub conditions: Option<Vec<String>>,
}
