//! Tracing setup for the studentdb console
//!
//! Logs go to stderr so they never interleave with the menu on stdout.
//!
//! Environment variables:
//!   RUST_LOG            # Log filter (default: warn)
//!   STUDENTDB_DEBUG=1   # Debug logging unless RUST_LOG is set

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (debug level unless RUST_LOG is explicitly set)
    pub debug: bool,
}

impl TracingConfig {
    pub fn from_env() -> Self {
        Self {
            debug: std::env::var("STUDENTDB_DEBUG")
                .map(|v| v == "1")
                .unwrap_or(false),
        }
    }

    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
