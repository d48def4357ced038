use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr. `RUST_LOG` is honored, `verbosity` raises the level of the esmpack crates:
/// 0 = warn, 1 = debug, 2+ = trace.
pub fn init(verbosity: u8, json: bool) {
  let level = match verbosity {
    0 => Level::WARN,
    1 => Level::DEBUG,
    _ => Level::TRACE,
  };

  let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  for target in ["esmpack", "esmpack_resolver"] {
    if let Ok(directive) = format!("{target}={level}").parse() {
      filter = filter.add_directive(directive);
    }
  }

  let subscriber = tracing_subscriber::registry().with(filter);

  if json {
    subscriber
      .with(
        fmt::layer()
          .json()
          .with_current_span(true)
          .with_span_list(false)
          .with_writer(std::io::stderr),
      )
      .init();
  } else {
    subscriber.with(fmt::layer().with_target(false).with_writer(std::io::stderr)).init();
  }
}
