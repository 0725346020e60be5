//! Broker-side snapshot of a submitted order.
//!
//! A [`LiveOrder`] is never mutated locally. Observing a newer status means
//! fetching a new snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::order_execution::value_objects::{
    InstrumentType, OrderAction, OrderStatus, OrderType, PriceEffect, TimeInForce,
};
use crate::domain::shared::{AccountNumber, OrderId};

/// One execution against a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fill {
    /// Broker fill id.
    #[serde(default)]
    pub fill_id: Option<String>,
    /// Executed quantity.
    pub quantity: Decimal,
    /// Execution price.
    pub fill_price: Decimal,
    /// Execution time.
    #[serde(default)]
    pub filled_at: Option<DateTime<Utc>>,
    /// Venue the fill happened on.
    #[serde(default)]
    pub destination_venue: Option<String>,
}

/// A leg of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LiveLeg {
    /// Instrument type.
    pub instrument_type: InstrumentType,
    /// Instrument symbol.
    pub symbol: String,
    /// Ordered quantity.
    pub quantity: Decimal,
    /// Unfilled quantity as reported by the broker.
    #[serde(default)]
    pub remaining_quantity: Option<Decimal>,
    /// Leg action.
    pub action: OrderAction,
    /// Executions so far.
    #[serde(default)]
    pub fills: Vec<Fill>,
}

impl LiveLeg {
    /// Filled quantity.
    ///
    /// Derived from the reported remainder when present, so broker rounding
    /// in the fill history does not leak through.
    #[must_use]
    pub fn filled_quantity(&self) -> Decimal {
        match self.remaining_quantity {
            Some(remaining) => self.quantity - remaining,
            None => self.fills.iter().map(|f| f.quantity).sum(),
        }
    }

    /// Unfilled quantity.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.remaining_quantity
            .unwrap_or_else(|| self.quantity - self.filled_quantity())
    }

    /// Returns true if part, but not all, of the leg has filled.
    #[must_use]
    pub fn is_partially_filled(&self) -> bool {
        let filled = self.filled_quantity();
        filled > Decimal::ZERO && filled < self.quantity
    }
}

/// Snapshot of an order as the broker reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LiveOrder {
    /// Broker order id.
    #[serde(deserialize_with = "deserialize_order_id")]
    pub id: OrderId,
    /// Owning account.
    #[serde(default)]
    pub account_number: Option<AccountNumber>,
    /// Current status.
    pub status: OrderStatus,
    /// Broker says a cancel would be accepted.
    #[serde(default)]
    pub cancellable: bool,
    /// Broker says a replace would be accepted.
    #[serde(default)]
    pub editable: bool,
    /// Order was produced by a replace.
    #[serde(default)]
    pub edited: bool,
    /// Order type.
    pub order_type: OrderType,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Expiry date for GTD orders.
    #[serde(default)]
    pub gtc_date: Option<NaiveDate>,
    /// Limit price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Price effect.
    #[serde(default)]
    pub price_effect: Option<PriceEffect>,
    /// Stop trigger.
    #[serde(default)]
    pub stop_trigger: Option<Decimal>,
    /// Underlying symbol.
    #[serde(default)]
    pub underlying_symbol: Option<String>,
    /// Caller-supplied identifier.
    #[serde(default)]
    pub external_identifier: Option<String>,
    /// Reason given by the broker for a rejection.
    #[serde(default)]
    pub reject_reason: Option<String>,
    /// When the broker received the order.
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    /// When the order reached a terminal status.
    #[serde(default)]
    pub terminal_at: Option<DateTime<Utc>>,
    /// Legs.
    #[serde(default)]
    pub legs: Vec<LiveLeg>,
}

impl LiveOrder {
    /// Leg trading the given symbol.
    #[must_use]
    pub fn leg_for_symbol(&self, symbol: &str) -> Option<&LiveLeg> {
        self.legs.iter().find(|leg| leg.symbol == symbol)
    }

    /// Returns true if any leg has a partial fill.
    #[must_use]
    pub fn is_partially_filled(&self) -> bool {
        self.legs.iter().any(LiveLeg::is_partially_filled)
    }

    /// Total unfilled quantity across legs.
    #[must_use]
    pub fn remaining_quantity(&self) -> Decimal {
        self.legs.iter().map(LiveLeg::remaining).sum()
    }
}

fn deserialize_order_id<'de, D>(deserializer: D) -> Result<OrderId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    OrderId::from_json(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid order id: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "id": 301,
            "account-number": "5WT00001",
            "status": "Live",
            "cancellable": true,
            "editable": true,
            "edited": false,
            "order-type": "Limit",
            "time-in-force": "Day",
            "price": "1.0",
            "price-effect": "Debit",
            "underlying-symbol": "AAPL",
            "received-at": "2026-03-02T15:01:02.123+00:00",
            "legs": [
                {
                    "instrument-type": "Equity Option",
                    "symbol": "AAPL  260320C00150000",
                    "quantity": 100,
                    "remaining-quantity": 50,
                    "action": "Buy to Open",
                    "fills": [
                        {"fill-id": "f1", "quantity": "49.999", "fill-price": "1.0"}
                    ]
                }
            ]
        })
    }

    #[test]
    fn parses_broker_snapshot() {
        let order: LiveOrder = serde_json::from_value(sample()).unwrap();
        assert_eq!(order.id, OrderId::new("301"));
        assert_eq!(order.status, OrderStatus::Live);
        assert!(order.cancellable);
        assert_eq!(order.price, Some(dec!(1.0)));
        assert_eq!(order.legs.len(), 1);
        assert!(order.received_at.is_some());
    }

    #[test]
    fn filled_quantity_prefers_remaining_field() {
        let order: LiveOrder = serde_json::from_value(sample()).unwrap();
        let leg = &order.legs[0];
        assert_eq!(leg.filled_quantity(), dec!(50));
        assert_eq!(leg.remaining(), dec!(50));
        assert!(order.is_partially_filled());
        assert_eq!(order.remaining_quantity(), dec!(50));
    }

    #[test]
    fn filled_quantity_falls_back_to_fills() {
        let leg = LiveLeg {
            instrument_type: InstrumentType::Equity,
            symbol: "AAPL".to_string(),
            quantity: dec!(10),
            remaining_quantity: None,
            action: OrderAction::Buy,
            fills: vec![
                Fill {
                    fill_id: None,
                    quantity: dec!(3),
                    fill_price: dec!(150),
                    filled_at: None,
                    destination_venue: None,
                },
                Fill {
                    fill_id: None,
                    quantity: dec!(2),
                    fill_price: dec!(150.01),
                    filled_at: None,
                    destination_venue: None,
                },
            ],
        };
        assert_eq!(leg.filled_quantity(), dec!(5));
        assert_eq!(leg.remaining(), dec!(5));
    }

    #[test]
    fn string_ids_accepted() {
        let mut json = sample();
        json["id"] = serde_json::json!("abc-1");
        let order: LiveOrder = serde_json::from_value(json).unwrap();
        assert_eq!(order.id.as_str(), "abc-1");
    }

    #[test]
    fn unknown_status_rejected() {
        let mut json = sample();
        json["status"] = serde_json::json!("Working");
        assert!(serde_json::from_value::<LiveOrder>(json).is_err());
    }

    #[test]
    fn leg_lookup_by_symbol() {
        let order: LiveOrder = serde_json::from_value(sample()).unwrap();
        assert!(order.leg_for_symbol("AAPL  260320C00150000").is_some());
        assert!(order.leg_for_symbol("MSFT").is_none());
    }
}
