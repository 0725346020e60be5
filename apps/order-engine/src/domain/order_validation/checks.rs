//! Pure per-order checks used by the validation pipeline.

use rust_decimal::Decimal;

use super::{OptionsLevel, TradingStatus};
use crate::domain::order_execution::aggregate::{Order, OrderLeg};
use crate::error::OrderEngineError;

/// Allowed leg quantity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityLimits {
    /// Smallest whole quantity.
    pub min: Decimal,
    /// Largest quantity.
    pub max: Decimal,
}

impl Default for QuantityLimits {
    fn default() -> Self {
        Self {
            min: Decimal::ONE,
            max: Decimal::from(999_999),
        }
    }
}

/// Check one leg's quantity.
///
/// Whole quantities must lie in `[min, max]`. Fractional quantities are
/// only accepted when the instrument allows them, and then any positive
/// amount up to `max` is fine.
pub fn check_quantity(
    leg: &OrderLeg,
    fractional_allowed: bool,
    limits: QuantityLimits,
) -> Result<(), OrderEngineError> {
    let quantity = leg.quantity();
    let field = "quantity";

    if quantity <= Decimal::ZERO {
        return Err(OrderEngineError::validation(
            field,
            format!("{} quantity must be positive, got {quantity}", leg.symbol()),
        ));
    }
    if quantity > limits.max {
        return Err(OrderEngineError::validation(
            field,
            format!("{} quantity {quantity} exceeds maximum of {}", leg.symbol(), limits.max),
        ));
    }
    if !quantity.fract().is_zero() {
        if fractional_allowed {
            return Ok(());
        }
        return Err(OrderEngineError::validation(
            field,
            format!("{} does not support fractional quantity {quantity}", leg.symbol()),
        ));
    }
    if quantity < limits.min {
        return Err(OrderEngineError::validation(
            field,
            format!("{} quantity {quantity} is below minimum of {}", leg.symbol(), limits.min),
        ));
    }
    Ok(())
}

/// Check the account may place every leg of `order`.
pub fn check_permissions(order: &Order, status: &TradingStatus) -> Result<(), OrderEngineError> {
    let denied = |reason: String| Err(OrderEngineError::validation("permissions", reason));

    if status.is_frozen {
        return denied("account is frozen".to_string());
    }

    for leg in order.legs() {
        let opening = !leg.is_closing();
        let instrument = leg.instrument_type();

        if opening && status.is_closing_only {
            return denied(format!(
                "account is closing-only; {} {} would open a position",
                leg.action(),
                leg.symbol()
            ));
        }
        if opening && status.is_in_margin_call {
            return denied(format!(
                "account is in a margin call; {} {} would open a position",
                leg.action(),
                leg.symbol()
            ));
        }
        if instrument.is_futures_product() {
            if !status.is_futures_enabled {
                return denied(format!("futures trading is not enabled for {}", leg.symbol()));
            }
            if opening && status.is_futures_closing_only {
                return denied(format!(
                    "futures are closing-only; {} would open a position",
                    leg.symbol()
                ));
            }
        }
        if instrument.is_option() && status.options_level == OptionsLevel::NoOptions {
            return denied(format!("options trading is not enabled for {}", leg.symbol()));
        }
    }

    check_options_level(order, status.options_level)
}

fn check_options_level(order: &Order, level: OptionsLevel) -> Result<(), OrderEngineError> {
    let opening_options: Vec<&OrderLeg> = order
        .legs()
        .iter()
        .filter(|leg| leg.instrument_type().is_option() && !leg.is_closing())
        .collect();
    if opening_options.is_empty() {
        return Ok(());
    }

    match level {
        OptionsLevel::NoOptions => Err(OrderEngineError::validation(
            "permissions",
            "options trading is not enabled",
        )),
        OptionsLevel::CoveredAndSecured if order.is_multi_leg() => Err(OrderEngineError::validation(
            "permissions",
            format!("multi-leg option orders require {}", OptionsLevel::DefinedRisk),
        )),
        OptionsLevel::DefinedRisk => {
            let sold: Decimal = opening_options
                .iter()
                .filter(|leg| leg.action().is_sell())
                .map(|leg| leg.quantity())
                .sum();
            let bought: Decimal = opening_options
                .iter()
                .filter(|leg| leg.action().is_buy())
                .map(|leg| leg.quantity())
                .sum();
            if sold > bought {
                return Err(OrderEngineError::validation(
                    "permissions",
                    format!(
                        "undefined-risk short options require {}",
                        OptionsLevel::NoRestrictions
                    ),
                ));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
