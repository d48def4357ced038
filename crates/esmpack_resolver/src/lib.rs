// An implementation of the ESM resolution algorithm used by Node.js, with `exports`/`imports`
// conditions, subpath patterns and self-referencing packages.

mod builtins;
mod format;
mod package;
mod package_json_store;
mod pattern;
mod resolver;
mod specifier;
mod target;

pub use crate::{
  builtins::is_builtin_module,
  package_json_store::PackageJsonStore,
  pattern::{match_pattern, pattern_key_compare, PatternMatch},
  resolver::Resolver,
  specifier::SpecifierKind,
};

pub use esmpack_common::{ConditionSet, ModuleFormat, Platform, ResolutionResult, ResolveOptions};
pub use esmpack_error::{ResolveError, ResolveErrorKind};
