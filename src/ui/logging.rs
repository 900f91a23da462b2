//! Tracing subscriber setup
//!
//! Call [`init_tracing`] once at program start. `RUST_LOG` takes precedence over the
//! level picked from the command line flags.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Level used when `RUST_LOG` is unset
pub fn default_level(verbose: bool) -> Level {
  if verbose { Level::DEBUG } else { Level::INFO }
}

/// Install the global subscriber, writing to stderr
///
/// With `json`, every event is emitted as one JSON line. Later calls are ignored.
pub fn init_tracing(json: bool, level: Level) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  if json {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
      .try_init()
      .ok();
  } else {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
      .try_init()
      .ok();
  }
}
