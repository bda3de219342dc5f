//! Diagnostic logging setup for the `wrank` binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary so embedders keep control of their own output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (usually from
/// `[logging] filter`) is used, falling back to `warn` if it does not parse.
/// Calling this twice is harmless.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
