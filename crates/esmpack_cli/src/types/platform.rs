use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Platform {
  Node,
  Browser,
  Neutral,
}

impl From<Platform> for esmpack::Platform {
  fn from(value: Platform) -> Self {
    match value {
      Platform::Node => esmpack::Platform::Node,
      Platform::Browser => esmpack::Platform::Browser,
      Platform::Neutral => esmpack::Platform::Neutral,
    }
  }
}
