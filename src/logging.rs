//! Tracing subscriber setup for applications embedding the library.

use crate::errors::{MedAgentError, MedAgentResult};
use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity count (`-v` style): 0 warn, 1 info, 2 debug,
/// anything higher trace.
pub fn filter_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a global fmt subscriber. `RUST_LOG` takes precedence over `verbosity`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(verbosity: u8) -> MedAgentResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| MedAgentError::Logging(e.to_string()))
}
