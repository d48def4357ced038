mod build_error;
mod resolve_error;

pub use crate::{
  build_error::{BuildError, BuildResult},
  resolve_error::{ResolveError, ResolveErrorKind},
};
