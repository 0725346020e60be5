//! Order validation thresholds and the regular session.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::services::ValidatorSettings;
use crate::domain::order_validation::{MarketHours, QuantityLimits};

use super::ConfigError;

/// Validation pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Smallest whole leg quantity.
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    /// Largest leg quantity.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
    /// Buying-power usage above this percentage warns.
    #[serde(default = "default_warning_pct")]
    pub buying_power_warning_pct: Decimal,
    /// Warn when validating outside the regular session.
    #[serde(default = "default_true")]
    pub warn_outside_market_hours: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_quantity: default_min_quantity(),
            max_quantity: default_max_quantity(),
            buying_power_warning_pct: default_warning_pct(),
            warn_outside_market_hours: true,
        }
    }
}

/// Regular session, `HH:MM` in US/Eastern time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketHoursConfig {
    /// Session open.
    #[serde(default = "default_open")]
    pub open: String,
    /// Session close.
    #[serde(default = "default_close")]
    pub close: String,
}

impl Default for MarketHoursConfig {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

impl MarketHoursConfig {
    /// Parse into a session.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` for malformed times or an open
    /// that is not before the close.
    pub fn to_market_hours(&self) -> Result<MarketHours, ConfigError> {
        let open = parse_time("market_hours.open", &self.open)?;
        let close = parse_time("market_hours.close", &self.close)?;
        if open >= close {
            return Err(ConfigError::ValidationError(
                "market_hours.open must be before market_hours.close".to_string(),
            ));
        }
        Ok(MarketHours::new(open, close))
    }
}

/// Build validator settings from configuration.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` if the market hours are invalid.
pub fn validator_settings(
    validation: &ValidationConfig,
    market_hours: &MarketHoursConfig,
) -> Result<ValidatorSettings, ConfigError> {
    Ok(ValidatorSettings {
        quantity_limits: QuantityLimits {
            min: Decimal::from(validation.min_quantity),
            max: Decimal::from(validation.max_quantity),
        },
        buying_power_warning_pct: validation.buying_power_warning_pct,
        warn_outside_market_hours: validation.warn_outside_market_hours,
        market_hours: market_hours.to_market_hours()?,
    })
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| ConfigError::ValidationError(format!("{field} '{value}' is not HH:MM: {e}")))
}

const fn default_min_quantity() -> u32 {
    1
}

const fn default_max_quantity() -> u32 {
    999_999
}

fn default_warning_pct() -> Decimal {
    Decimal::from(80)
}

const fn default_true() -> bool {
    true
}

fn default_open() -> String {
    "09:30".to_string()
}

fn default_close() -> String {
    "16:00".to_string()
}
