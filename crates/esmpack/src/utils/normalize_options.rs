use esmpack_common::{BundlerOptions, NormalizedBundlerOptions, ResolveOptions};

pub struct NormalizeOptionsReturn {
  pub options: NormalizedBundlerOptions,
  pub resolve_options: ResolveOptions,
}

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizeOptionsReturn {
  let platform = raw_options.platform.unwrap_or_default();

  let resolve_options =
    ResolveOptions { platform, conditions: raw_options.conditions.unwrap_or_default() };

  let normalized = NormalizedBundlerOptions {
    input: raw_options.input.unwrap_or_default(),
    cwd: raw_options
      .cwd
      .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current dir")),
    platform,
  };

  NormalizeOptionsReturn { options: normalized, resolve_options }
}

#[test]
fn test_normalize_defaults() {
  let NormalizeOptionsReturn { options, resolve_options } =
    normalize_options(BundlerOptions::default());
  assert!(options.input.is_empty());
  assert_eq!(options.platform, esmpack_common::Platform::Node);
  assert_eq!(resolve_options.condition_set().iter().collect::<Vec<_>>(), ["import", "node"]);
}
