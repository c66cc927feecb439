//! Diagnostic logging on stderr.
//!
//! Stdout is reserved for catalog output (`--stdout`), so every subscriber
//! writes to stderr. `STOREGEN_LOG` takes an `EnvFilter` directive and wins
//! over the verbosity flag.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "STOREGEN_LOG";

/// Filter directive for a `-v` count: warn, info, then debug.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: u8) {
    let filter = crate::env_non_empty(LOG_ENV)
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
