//! Validation outcome types.

use rust_decimal::Decimal;
use std::fmt;

use crate::domain::buying_power::BuyingPowerEffect;
use crate::error::ErrorCode;

/// How the validator treats hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first hard failure and return it.
    #[default]
    Strict,
    /// Run every step and collect hard failures in the report.
    DryRun,
}

impl ValidationMode {
    /// Returns true if failures are collected instead of raised.
    #[must_use]
    pub const fn collects_errors(&self) -> bool {
        matches!(self, Self::DryRun)
    }
}

/// Pipeline step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStep {
    /// Every symbol resolves to an active instrument.
    Symbol,
    /// Leg quantities are in range.
    Quantity,
    /// Price sits on the tick grid.
    Price,
    /// Account may trade every leg.
    Permissions,
    /// Dry-run buying-power check.
    BuyingPower,
    /// Regular session check.
    MarketHours,
}

impl ValidationStep {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Quantity => "quantity",
            Self::Price => "price",
            Self::Permissions => "permissions",
            Self::BuyingPower => "buying_power",
            Self::MarketHours => "market_hours",
        }
    }
}

impl fmt::Display for ValidationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-blocking finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Order would use more than the configured share of buying power.
    HighBuyingPowerUsage {
        /// Usage in percent.
        usage_pct: Decimal,
        /// Configured threshold in percent.
        threshold_pct: Decimal,
    },
    /// Submitted outside the regular session.
    OutsideMarketHours,
    /// Price was moved onto the tick grid.
    PriceRounded {
        /// Price as submitted.
        original: Decimal,
        /// Price after rounding.
        rounded: Decimal,
    },
    /// Warning text returned by the broker's dry run.
    Broker(String),
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighBuyingPowerUsage {
                usage_pct,
                threshold_pct,
            } => write!(
                f,
                "order uses {usage_pct}% of buying power (threshold {threshold_pct}%)"
            ),
            Self::OutsideMarketHours => {
                write!(f, "market is closed; the order will rest until the next session")
            }
            Self::PriceRounded { original, rounded } => {
                write!(f, "price {original} rounded to {rounded} to match tick size")
            }
            Self::Broker(message) => f.write_str(message),
        }
    }
}

/// Hard failure recorded in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Step that failed.
    pub step: ValidationStep,
    /// Error code of the failure.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.step, self.message)
    }
}

/// Result of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Non-blocking findings.
    pub warnings: Vec<ValidationWarning>,
    /// Hard failures, only populated in dry-run mode.
    pub errors: Vec<ValidationIssue>,
    /// Tick-rounded price when it differs from the submitted one.
    pub adjusted_price: Option<Decimal>,
    /// Buying-power effect returned by the dry run.
    pub buying_power_effect: Option<BuyingPowerEffect>,
}

impl ValidationReport {
    /// Returns true if no hard failure was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if at least one warning was attached.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn warning_messages_name_the_values() {
        let warning = ValidationWarning::HighBuyingPowerUsage {
            usage_pct: dec!(85.5),
            threshold_pct: dec!(80),
        };
        assert_eq!(
            warning.to_string(),
            "order uses 85.5% of buying power (threshold 80%)"
        );

        let rounded = ValidationWarning::PriceRounded {
            original: dec!(3.12),
            rounded: dec!(3.10),
        };
        assert!(rounded.to_string().contains("3.12"));
        assert!(rounded.to_string().contains("3.10"));
    }

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::default();
        assert!(report.is_valid());
        assert!(!report.has_warnings());
    }

    #[test]
    fn issue_display_includes_code_and_step() {
        let issue = ValidationIssue {
            step: ValidationStep::Quantity,
            code: ErrorCode::OrderValidationFailed,
            message: "too big".to_string(),
        };
        assert_eq!(issue.to_string(), "[ORDER_VALIDATION_FAILED] quantity: too big");
    }
}
