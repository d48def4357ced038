use std::path::PathBuf;

use clap::Args;

use crate::types::platform::Platform;

#[derive(Args)]
pub struct InputArgs {
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, short, num_args = 1.., action = clap::ArgAction::Append)]
  pub input: Option<Vec<PathBuf>>,

  #[clap(long, short)]
  pub platform: Option<Platform>,

  /// Extra export conditions, e.g. `--condition development`
  #[clap(long = "condition", short = 'C', action = clap::ArgAction::Append)]
  pub conditions: Option<Vec<String>>,
}

#[derive(Args)]
pub struct ReportArgs {
  /// Resolve a single specifier from the first input (or the cwd) instead of scanning
  #[clap(long, value_name = "SPECIFIER")]
  pub resolve: Option<String>,

  /// Increase log verbosity (-v debug, -vv trace)
  #[clap(long, short, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Write logs to stderr as JSON lines
  #[clap(long)]
  pub json: bool,
}
