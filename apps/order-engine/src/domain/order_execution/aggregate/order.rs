//! Order aggregate (candidate order before submission).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderLeg;
use crate::domain::option_strategy::StrategyType;
use crate::domain::order_execution::value_objects::{OrderType, PriceEffect, TimeInForce};
use crate::error::OrderEngineError;

/// Optional broker-side processing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdvancedInstructions {
    /// Reject legs whose position effect does not match the held position.
    pub strict_position_effect_validation: bool,
}

/// An order ready to be validated and submitted.
///
/// Orders are immutable value objects: every "change" produces a new order.
/// Use [`OrderBuilder`] to construct one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_type: OrderType,
    time_in_force: TimeInForce,
    gtc_date: Option<NaiveDate>,
    price: Option<Decimal>,
    price_effect: PriceEffect,
    stop_trigger: Option<Decimal>,
    legs: Vec<OrderLeg>,
    underlying_symbol: Option<String>,
    strategy: Option<StrategyType>,
    advanced_instructions: Option<AdvancedInstructions>,
    external_identifier: Option<String>,
}

impl Order {
    /// Start building an order of the given type.
    #[must_use]
    pub fn builder(order_type: OrderType) -> OrderBuilder {
        OrderBuilder::new(order_type)
    }

    /// Order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Time in force.
    #[must_use]
    pub const fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    /// Expiry date for GTD orders.
    #[must_use]
    pub const fn gtc_date(&self) -> Option<NaiveDate> {
        self.gtc_date
    }

    /// Limit price (always positive; direction is carried by `price_effect`).
    #[must_use]
    pub const fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// Net cash direction.
    #[must_use]
    pub const fn price_effect(&self) -> PriceEffect {
        self.price_effect
    }

    /// Stop trigger price.
    #[must_use]
    pub const fn stop_trigger(&self) -> Option<Decimal> {
        self.stop_trigger
    }

    /// Legs in submission order.
    #[must_use]
    pub fn legs(&self) -> &[OrderLeg] {
        &self.legs
    }

    /// Shared underlying for strategy orders.
    #[must_use]
    pub fn underlying_symbol(&self) -> Option<&str> {
        self.underlying_symbol.as_deref()
    }

    /// Strategy shape, when built by the strategy builder.
    #[must_use]
    pub const fn strategy(&self) -> Option<StrategyType> {
        self.strategy
    }

    /// Advanced instructions.
    #[must_use]
    pub const fn advanced_instructions(&self) -> Option<AdvancedInstructions> {
        self.advanced_instructions
    }

    /// Caller-supplied identifier echoed back by the broker.
    #[must_use]
    pub fn external_identifier(&self) -> Option<&str> {
        self.external_identifier.as_deref()
    }

    /// Returns true for orders with more than one leg.
    #[must_use]
    pub fn is_multi_leg(&self) -> bool {
        self.legs.len() > 1
    }

    /// Returns true if any leg opens a position.
    #[must_use]
    pub fn has_opening_legs(&self) -> bool {
        self.legs.iter().any(OrderLeg::is_opening)
    }

    /// Copy of this order with a different limit price.
    #[must_use]
    pub fn with_price(&self, price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..self.clone()
        }
    }
}

/// Fluent builder for [`Order`].
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    order_type: OrderType,
    time_in_force: TimeInForce,
    gtc_date: Option<NaiveDate>,
    price: Option<Decimal>,
    price_effect: Option<PriceEffect>,
    stop_trigger: Option<Decimal>,
    legs: Vec<OrderLeg>,
    underlying_symbol: Option<String>,
    strategy: Option<StrategyType>,
    advanced_instructions: Option<AdvancedInstructions>,
    external_identifier: Option<String>,
}

impl OrderBuilder {
    /// Create a builder for a Day order of the given type.
    #[must_use]
    pub fn new(order_type: OrderType) -> Self {
        Self {
            order_type,
            time_in_force: TimeInForce::Day,
            gtc_date: None,
            price: None,
            price_effect: None,
            stop_trigger: None,
            legs: Vec::new(),
            underlying_symbol: None,
            strategy: None,
            advanced_instructions: None,
            external_identifier: None,
        }
    }

    /// Set time in force.
    #[must_use]
    pub const fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    /// Set the expiry date (GTD only).
    #[must_use]
    pub const fn gtc_date(mut self, date: NaiveDate) -> Self {
        self.gtc_date = Some(date);
        self
    }

    /// Set the limit price.
    #[must_use]
    pub const fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the price effect explicitly.
    #[must_use]
    pub const fn price_effect(mut self, effect: PriceEffect) -> Self {
        self.price_effect = Some(effect);
        self
    }

    /// Set the stop trigger.
    #[must_use]
    pub const fn stop_trigger(mut self, trigger: Decimal) -> Self {
        self.stop_trigger = Some(trigger);
        self
    }

    /// Append a leg.
    #[must_use]
    pub fn leg(mut self, leg: OrderLeg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Append several legs.
    #[must_use]
    pub fn legs(mut self, legs: impl IntoIterator<Item = OrderLeg>) -> Self {
        self.legs.extend(legs);
        self
    }

    /// Record the shared underlying symbol.
    #[must_use]
    pub fn underlying_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.underlying_symbol = Some(symbol.into());
        self
    }

    /// Record the strategy shape.
    #[must_use]
    pub const fn strategy(mut self, strategy: StrategyType) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Attach advanced instructions.
    #[must_use]
    pub const fn advanced_instructions(mut self, instructions: AdvancedInstructions) -> Self {
        self.advanced_instructions = Some(instructions);
        self
    }

    /// Attach a caller-supplied identifier.
    #[must_use]
    pub fn external_identifier(mut self, id: impl Into<String>) -> Self {
        self.external_identifier = Some(id.into());
        self
    }

    /// Validate field combinations and build the order.
    pub fn build(self) -> Result<Order, OrderEngineError> {
        if self.legs.is_empty() {
            return Err(OrderEngineError::validation("legs", "order must have at least one leg"));
        }

        match (self.order_type.requires_price(), self.price) {
            (true, None) => {
                return Err(OrderEngineError::validation(
                    "price",
                    format!("price is required for {} orders", self.order_type),
                ));
            }
            (true, Some(price)) if price <= Decimal::ZERO => {
                return Err(OrderEngineError::validation("price", "price must be positive"));
            }
            (false, Some(_)) => {
                return Err(OrderEngineError::validation(
                    "price",
                    format!("price is not allowed for {} orders", self.order_type),
                ));
            }
            _ => {}
        }

        match (self.order_type.requires_stop_trigger(), self.stop_trigger) {
            (true, None) => {
                return Err(OrderEngineError::validation(
                    "stop_trigger",
                    format!("stop trigger is required for {} orders", self.order_type),
                ));
            }
            (true, Some(trigger)) if trigger <= Decimal::ZERO => {
                return Err(OrderEngineError::validation(
                    "stop_trigger",
                    "stop trigger must be positive",
                ));
            }
            (false, Some(_)) => {
                return Err(OrderEngineError::validation(
                    "stop_trigger",
                    format!("stop trigger is not allowed for {} orders", self.order_type),
                ));
            }
            _ => {}
        }

        match (self.time_in_force.requires_date(), self.gtc_date) {
            (true, None) => {
                return Err(OrderEngineError::validation(
                    "gtc_date",
                    "gtc date is required for GTD orders",
                ));
            }
            (false, Some(_)) => {
                return Err(OrderEngineError::validation(
                    "gtc_date",
                    format!("gtc date is not allowed for {} orders", self.time_in_force),
                ));
            }
            _ => {}
        }

        let price_effect = match self.price_effect {
            Some(effect) => effect,
            None => derive_price_effect(&self.legs)?,
        };

        Ok(Order {
            order_type: self.order_type,
            time_in_force: self.time_in_force,
            gtc_date: self.gtc_date,
            price: self.price,
            price_effect,
            stop_trigger: self.stop_trigger,
            legs: self.legs,
            underlying_symbol: self.underlying_symbol,
            strategy: self.strategy,
            advanced_instructions: self.advanced_instructions,
            external_identifier: self.external_identifier,
        })
    }
}

// Without leg prices only a one-sided order has an unambiguous direction.
fn derive_price_effect(legs: &[OrderLeg]) -> Result<PriceEffect, OrderEngineError> {
    if legs.iter().all(|leg| leg.action().is_buy()) {
        Ok(PriceEffect::Debit)
    } else if legs.iter().all(|leg| leg.action().is_sell()) {
        Ok(PriceEffect::Credit)
    } else {
        Err(OrderEngineError::validation(
            "price_effect",
            "price effect must be set explicitly for orders that both buy and sell",
        ))
    }
}
