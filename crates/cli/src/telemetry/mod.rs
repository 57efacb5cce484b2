//! Telemetry initialisation for the `confseal` CLI.
//!
//! Logs go to stderr so that stdout carries only result text. Key material,
//! passphrases, plaintext and payload text must never appear in a log field.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` overrides `log_level` when set.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let res = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    res.map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
