//! Configuration module for the order engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before use.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::config::load_config;
//!
//! // Load from default path (order-engine.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/order-engine.yaml"))?;
//!
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod observability;
mod validation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::services::ValidatorSettings;

pub use api::{ApiConfig, PRODUCTION_BASE_URL, RetryConfig, SANDBOX_BASE_URL};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use validation::{MarketHoursConfig, ValidationConfig, validator_settings};

/// Default configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "order-engine.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Brokerage API connection.
    #[serde(default)]
    pub api: ApiConfig,
    /// Validation thresholds.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Regular session.
    #[serde(default)]
    pub market_hours: MarketHoursConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Validator settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the market hours are invalid.
    pub fn validator_settings(&self) -> Result<ValidatorSettings, ConfigError> {
        validator_settings(&self.validation, &self.market_hours)
    }

    /// Fail unless a session token and account are configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming the missing setting.
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        if self.api.session_token.is_empty() {
            return Err(ConfigError::MissingEnvVar("api.session_token".to_string()));
        }
        if self.api.account_number.is_empty() {
            return Err(ConfigError::MissingEnvVar("api.account_number".to_string()));
        }
        Ok(())
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "order-engine.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "api.base_url must not be empty".to_string(),
        ));
    }

    if config.api.retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "api.retry.max_attempts must be at least 1".to_string(),
        ));
    }

    if config.api.retry.multiplier < 1.0 {
        return Err(ConfigError::ValidationError(
            "api.retry.multiplier must be at least 1.0".to_string(),
        ));
    }

    let v = &config.validation;
    if v.min_quantity == 0 {
        return Err(ConfigError::ValidationError(
            "validation.min_quantity must be at least 1".to_string(),
        ));
    }

    if v.min_quantity > v.max_quantity {
        return Err(ConfigError::ValidationError(
            "validation.min_quantity must not exceed validation.max_quantity".to_string(),
        ));
    }

    let pct = v.buying_power_warning_pct;
    if pct <= rust_decimal::Decimal::ZERO || pct > rust_decimal::Decimal::ONE_HUNDRED {
        return Err(ConfigError::ValidationError(
            "validation.buying_power_warning_pct must be in (0, 100]".to_string(),
        ));
    }

    config.market_hours.to_market_hours()?;

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
