//! Tracing subscriber setup

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::ports::LogLevel;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(level: LogLevel, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;
    tracing::debug!("Logging initialized at level {}", level.as_str());
    Ok(())
}
