use url::Url;

use crate::ModuleFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
  pub location: Url,
  pub format: ModuleFormat,
}
