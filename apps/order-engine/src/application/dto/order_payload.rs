//! Order submission payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::aggregate::{AdvancedInstructions, Order, OrderLeg};
use crate::domain::order_execution::value_objects::{
    InstrumentType, OrderAction, OrderType, PositionEffect, PriceEffect, TimeInForce,
};

/// Wire form of one leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LegPayload {
    /// Leg action.
    pub action: OrderAction,
    /// Instrument symbol.
    pub symbol: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Instrument type.
    pub instrument_type: InstrumentType,
    /// Omitted for `Auto` so the broker infers it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_effect: Option<PositionEffect>,
}

impl From<&OrderLeg> for LegPayload {
    fn from(leg: &OrderLeg) -> Self {
        let effect = leg.position_effect();
        Self {
            action: leg.action(),
            symbol: leg.symbol().to_string(),
            quantity: leg.quantity(),
            instrument_type: leg.instrument_type(),
            position_effect: (!effect.is_auto()).then_some(effect),
        }
    }
}

/// Wire form of an order, as posted to `/orders` and `/orders/dry-run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderPayload {
    /// Order type.
    pub order_type: OrderType,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Expiry date for GTD orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtc_date: Option<NaiveDate>,
    /// Limit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Debit or credit. Market orders carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_effect: Option<PriceEffect>,
    /// Stop trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_trigger: Option<Decimal>,
    /// Underlying symbol for strategy orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying_symbol: Option<String>,
    /// Caller-supplied identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_identifier: Option<String>,
    /// Broker processing flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_instructions: Option<AdvancedInstructions>,
    /// Legs, in order.
    pub legs: Vec<LegPayload>,
}

impl From<&Order> for OrderPayload {
    fn from(order: &Order) -> Self {
        Self {
            order_type: order.order_type(),
            time_in_force: order.time_in_force(),
            gtc_date: order.gtc_date(),
            price: order.price(),
            price_effect: order.price().map(|_| order.price_effect()),
            stop_trigger: order.stop_trigger(),
            underlying_symbol: order.underlying_symbol().map(str::to_string),
            external_identifier: order.external_identifier().map(str::to_string),
            advanced_instructions: order.advanced_instructions(),
            legs: order.legs().iter().map(LegPayload::from).collect(),
        }
    }
}

impl OrderPayload {
    /// JSON body for the transport.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn limit_order() -> Order {
        Order::builder(OrderType::Limit)
            .price(dec!(1.25))
            .leg(
                OrderLeg::new(
                    OrderAction::BuyToOpen,
                    "AAPL  260320C00150000",
                    dec!(2),
                    InstrumentType::EquityOption,
                )
                .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn serialises_kebab_case_wire_shape() {
        let json = OrderPayload::from(&limit_order()).to_json().unwrap();
        assert_eq!(json["order-type"], "Limit");
        assert_eq!(json["time-in-force"], "Day");
        assert_eq!(json["price"], "1.25");
        assert_eq!(json["price-effect"], "Debit");
        assert!(json.get("stop-trigger").is_none());
        assert!(json.get("gtc-date").is_none());

        let leg = &json["legs"][0];
        assert_eq!(leg["action"], "Buy to Open");
        assert_eq!(leg["instrument-type"], "Equity Option");
        assert_eq!(leg["quantity"], "2");
        assert_eq!(leg["position-effect"], "Opening");
    }

    #[test]
    fn auto_position_effect_is_omitted() {
        let order = Order::builder(OrderType::Market)
            .leg(OrderLeg::new(OrderAction::Buy, "AAPL", dec!(10), InstrumentType::Equity).unwrap())
            .build()
            .unwrap();
        let json = OrderPayload::from(&order).to_json().unwrap();
        assert!(json["legs"][0].get("position-effect").is_none());
        assert!(json.get("price-effect").is_none());
    }

    #[test]
    fn gtd_orders_carry_date() {
        let order = Order::builder(OrderType::Limit)
            .price(dec!(10))
            .time_in_force(TimeInForce::Gtd)
            .gtc_date(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
            .advanced_instructions(AdvancedInstructions {
                strict_position_effect_validation: true,
            })
            .leg(OrderLeg::new(OrderAction::Sell, "AAPL", dec!(1), InstrumentType::Equity).unwrap())
            .build()
            .unwrap();
        let json = OrderPayload::from(&order).to_json().unwrap();
        assert_eq!(json["time-in-force"], "GTD");
        assert_eq!(json["gtc-date"], "2026-12-31");
        assert_eq!(
            json["advanced-instructions"]["strict-position-effect-validation"],
            true
        );
    }
}
