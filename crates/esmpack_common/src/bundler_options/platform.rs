use std::fmt::Display;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
  /// Resolves with the `node` condition and recognizes Node.js built-in modules.
  #[default]
  Node,
  /// Resolves with the `browser` condition.
  Browser,
  /// Resolves with no platform condition.
  Neutral,
}

impl Platform {
  /// The condition name this platform adds to every resolution.
  pub fn condition(&self) -> Option<&'static str> {
    match self {
      Self::Node => Some("node"),
      Self::Browser => Some("browser"),
      Self::Neutral => None,
    }
  }
}

impl Display for Platform {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Node => write!(f, "node"),
      Self::Browser => write!(f, "browser"),
      Self::Neutral => write!(f, "neutral"),
    }
  }
}
