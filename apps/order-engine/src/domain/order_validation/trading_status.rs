//! Account trading permissions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::AccountNumber;

/// Options approval level, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum OptionsLevel {
    /// No option trading.
    #[default]
    #[serde(rename = "No Options")]
    NoOptions,
    /// Covered calls and cash-secured puts.
    #[serde(rename = "Covered And Secured")]
    CoveredAndSecured,
    /// Spreads whose risk is capped.
    #[serde(rename = "Defined Risk Spreads", alias = "Defined Risk")]
    DefinedRisk,
    /// Everything, including naked short options.
    #[serde(rename = "No Restrictions")]
    NoRestrictions,
}

impl fmt::Display for OptionsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOptions => write!(f, "No Options"),
            Self::CoveredAndSecured => write!(f, "Covered And Secured"),
            Self::DefinedRisk => write!(f, "Defined Risk Spreads"),
            Self::NoRestrictions => write!(f, "No Restrictions"),
        }
    }
}

/// Trading-status flags of an account, as reported by the broker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TradingStatus {
    /// Options approval level.
    #[serde(default)]
    pub options_level: OptionsLevel,
    /// Futures trading enabled.
    #[serde(default)]
    pub is_futures_enabled: bool,
    /// Only closing orders accepted.
    #[serde(default)]
    pub is_closing_only: bool,
    /// Only closing futures orders accepted.
    #[serde(default)]
    pub is_futures_closing_only: bool,
    /// No orders accepted.
    #[serde(default)]
    pub is_frozen: bool,
    /// Account is in a margin call.
    #[serde(default)]
    pub is_in_margin_call: bool,
}

impl TradingStatus {
    /// Unrestricted status, mostly useful in tests and paper accounts.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            options_level: OptionsLevel::NoRestrictions,
            is_futures_enabled: true,
            is_closing_only: false,
            is_futures_closing_only: false,
            is_frozen: false,
            is_in_margin_call: false,
        }
    }
}

/// Account an order is validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    /// Account number.
    pub account_number: AccountNumber,
    /// Current trading status.
    pub trading_status: TradingStatus,
}

impl AccountContext {
    /// Create a context.
    #[must_use]
    pub const fn new(account_number: AccountNumber, trading_status: TradingStatus) -> Self {
        Self {
            account_number,
            trading_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_levels_are_ordered() {
        assert!(OptionsLevel::NoOptions < OptionsLevel::CoveredAndSecured);
        assert!(OptionsLevel::CoveredAndSecured < OptionsLevel::DefinedRisk);
        assert!(OptionsLevel::DefinedRisk < OptionsLevel::NoRestrictions);
    }

    #[test]
    fn parses_trading_status() {
        let json = serde_json::json!({
            "account-number": "5WT00001",
            "options-level": "Defined Risk Spreads",
            "is-futures-enabled": false,
            "is-closing-only": false,
            "is-frozen": false,
            "is-in-margin-call": true,
            "is-pattern-day-trader": false
        });
        let status: TradingStatus = serde_json::from_value(json).unwrap();
        assert_eq!(status.options_level, OptionsLevel::DefinedRisk);
        assert!(status.is_in_margin_call);
        assert!(!status.is_futures_enabled);
    }

    #[test]
    fn default_is_most_restrictive_options_level() {
        assert_eq!(TradingStatus::default().options_level, OptionsLevel::NoOptions);
    }
}
