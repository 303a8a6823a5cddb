//! Structured logging setup
//!
//! Logs go to stderr only: stdout carries the MCP protocol stream.
//! `RUST_LOG` takes precedence over the configured level.

use crate::errors::{BridgeError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `level`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber
pub fn init(level: &str) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(stderr_layer)
        .try_init()
        .map_err(|e| BridgeError::LoggingError(e.to_string()))
}
