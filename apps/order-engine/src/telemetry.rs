//! Tracing Setup
//!
//! Installs a `tracing-subscriber` formatter driven by [`LoggingConfig`].
//! `RUST_LOG` wins over the configured level. The library never installs a
//! metrics exporter; counters go to whatever recorder the host installs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::{config::load_config, telemetry::init_telemetry};
//!
//! let config = load_config(None)?;
//! init_telemetry(&config.observability.logging)?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::LoggingConfig;

/// Telemetry initialisation errors.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("Invalid log level '{level}': {message}")]
    InvalidLevel {
        /// Configured level.
        level: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    AlreadyInstalled(String),
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns `TelemetryError` if the level is invalid or a subscriber is
/// already installed.
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidLevel {
            level: config.level.clone(),
            message: e.to_string(),
        })?,
    };

    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_span_events(span_events);

    let result = if config.format == "pretty" {
        builder.pretty().try_init()
    } else {
        builder.json().with_current_span(config.include_spans).try_init()
    };

    result.map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))?;
    tracing::debug!(level = %config.level, format = %config.format, "Telemetry initialised");
    Ok(())
}
