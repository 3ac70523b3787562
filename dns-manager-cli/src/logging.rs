//! Logging setup.
//!
//! Library crates log through the `log` facade; their records are bridged
//! into `tracing` and written to stderr so stdout stays pure JSON.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `default_level` (the configured `log.level`).
pub fn init(default_level: &str) -> Result<()> {
    tracing_log::LogTracer::init().context("Failed to bridge log records")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log level: {default_level}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
