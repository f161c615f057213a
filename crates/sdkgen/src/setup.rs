//! Logging initialization

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for logging
///
/// Configures the tracing subscriber with:
/// - Environment filter from `RUST_LOG` (defaults to WARN level)
/// - Stderr output, so generated code on stdout stays clean
///
/// # Errors
/// Returns an error if a subscriber is already installed
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
