//! A single tradable instruction within an order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::value_objects::{InstrumentType, OrderAction, PositionEffect};
use crate::error::OrderEngineError;

/// One leg of an order.
///
/// Legs are immutable once built. The quantity range is not checked here;
/// the validator enforces it so decoded or hand-built legs can be checked
/// the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLeg {
    action: OrderAction,
    symbol: String,
    quantity: Decimal,
    instrument_type: InstrumentType,
    position_effect: PositionEffect,
    ratio_quantity: u32,
}

impl OrderLeg {
    /// Create a leg whose position effect follows from its action.
    pub fn new(
        action: OrderAction,
        symbol: impl Into<String>,
        quantity: Decimal,
        instrument_type: InstrumentType,
    ) -> Result<Self, OrderEngineError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(OrderEngineError::validation("symbol", "leg symbol must not be empty"));
        }

        if instrument_type.is_option() && !action.has_position_intent() {
            return Err(OrderEngineError::validation(
                "action",
                format!("{instrument_type} legs require an open or close action, got {action}"),
            ));
        }

        Ok(Self {
            action,
            symbol,
            quantity,
            instrument_type,
            position_effect: action.implied_position_effect(),
            ratio_quantity: 1,
        })
    }

    /// Override the position effect.
    ///
    /// `Auto` is always accepted. An explicit effect must agree with an
    /// open/close action.
    pub fn with_position_effect(mut self, effect: PositionEffect) -> Result<Self, OrderEngineError> {
        let implied = self.action.implied_position_effect();
        if !effect.is_auto() && !implied.is_auto() && effect != implied {
            return Err(OrderEngineError::validation(
                "position_effect",
                format!("{effect} contradicts action {}", self.action),
            ));
        }
        self.position_effect = effect;
        Ok(self)
    }

    /// Set the ratio multiplier used by strategy shapes.
    pub fn with_ratio_quantity(mut self, ratio: u32) -> Result<Self, OrderEngineError> {
        if ratio == 0 {
            return Err(OrderEngineError::validation(
                "ratio_quantity",
                "ratio quantity must be at least 1",
            ));
        }
        self.ratio_quantity = ratio;
        Ok(self)
    }

    /// Leg action.
    #[must_use]
    pub const fn action(&self) -> OrderAction {
        self.action
    }

    /// Instrument symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Leg quantity (already multiplied by the ratio for strategy orders).
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Instrument type.
    #[must_use]
    pub const fn instrument_type(&self) -> InstrumentType {
        self.instrument_type
    }

    /// Position effect.
    #[must_use]
    pub const fn position_effect(&self) -> PositionEffect {
        self.position_effect
    }

    /// Ratio multiplier.
    #[must_use]
    pub const fn ratio_quantity(&self) -> u32 {
        self.ratio_quantity
    }

    /// Returns true if this leg opens a position.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        matches!(self.position_effect, PositionEffect::Opening)
    }

    /// Returns true if this leg closes a position.
    #[must_use]
    pub const fn is_closing(&self) -> bool {
        matches!(self.position_effect, PositionEffect::Closing)
    }
}
