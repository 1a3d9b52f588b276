//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Pick the filter directive: `-v` flags raise the configured level
#[must_use]
pub fn log_filter(config: &LoggingConfig, verbose: u8) -> String {
    let configured = match config.level.as_str() {
        "error" => 0,
        "warn" => 1,
        "info" => 2,
        "debug" => 3,
        _ => 4,
    };

    let level = match configured + u32::from(verbose) {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    // reqwest and hyper are noisy below info
    format!("{level},hyper=info,reqwest=info")
}

/// Install the global subscriber. Logs go to stderr so rendered output on
/// stdout stays clean. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig, verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(config, verbose)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize tracing: {e}"))
}
