//! Broker response decoding.
//!
//! Responses wrap their payload in a `data` object. Lists arrive as
//! `data.items`.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::buying_power::BuyingPowerEffect;
use crate::domain::order_execution::aggregate::LiveOrder;
use crate::domain::order_execution::value_objects::PriceEffect;
use crate::domain::order_validation::ValidationReport;
use crate::error::OrderEngineError;

/// Warning or error entry returned by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerMessage {
    /// Machine-readable code.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable text.
    pub message: String,
}

/// Fees the broker would charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeeCalculation {
    /// Total fees.
    #[serde(default)]
    pub total_fees: Option<Decimal>,
    /// Direction of the fees.
    #[serde(default)]
    pub total_fees_effect: Option<PriceEffect>,
}

/// Result of a submission, dry run or replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderResponse {
    /// Created order. Always `None` for dry runs.
    pub order: Option<LiveOrder>,
    /// Buying-power impact.
    pub buying_power_effect: Option<BuyingPowerEffect>,
    /// Fee preview.
    pub fee_calculation: Option<FeeCalculation>,
    /// Broker warnings.
    pub warnings: Vec<BrokerMessage>,
    /// Client-side validation outcome, when validation ran.
    pub validation: Option<ValidationReport>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawOrderResponse {
    #[serde(default)]
    order: Option<Value>,
    #[serde(default)]
    buying_power_effect: Option<BuyingPowerEffect>,
    #[serde(default)]
    fee_calculation: Option<FeeCalculation>,
    #[serde(default)]
    warnings: Vec<BrokerMessage>,
}

impl OrderResponse {
    /// Decode a submission response.
    ///
    /// Dry-run responses may echo the order back, but it was never created,
    /// so it is dropped.
    pub fn decode(body: Value, dry_run: bool) -> Result<Self, OrderEngineError> {
        let raw: RawOrderResponse = decode_data(body)?;
        let order = match raw.order {
            Some(order) if !dry_run => Some(decode_value::<LiveOrder>(order)?),
            _ => None,
        };
        Ok(Self {
            order,
            buying_power_effect: raw.buying_power_effect,
            fee_calculation: raw.fee_calculation,
            warnings: raw.warnings,
            validation: None,
        })
    }

    /// Decode a replace response, which may carry the new order bare or
    /// under `order`.
    pub fn decode_replacement(body: Value) -> Result<Self, OrderEngineError> {
        match unwrap_data(body) {
            Value::Object(map) if !map.contains_key("order") => {
                Ok(Self::from_order(decode_value(Value::Object(map))?))
            }
            other => Self::decode(other, false),
        }
    }

    /// Response carrying only an order.
    #[must_use]
    pub fn from_order(order: LiveOrder) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    /// Attach the validation outcome.
    #[must_use]
    pub fn with_validation(mut self, report: ValidationReport) -> Self {
        self.validation = Some(report);
        self
    }
}

/// Strip the `data` wrapper, if any, and decode.
pub fn decode_data<T: DeserializeOwned>(body: Value) -> Result<T, OrderEngineError> {
    decode_value(unwrap_data(body))
}

/// Decode `data.items`, tolerating a bare array.
pub fn decode_items<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, OrderEngineError> {
    match unwrap_data(body) {
        Value::Object(mut map) => match map.remove("items") {
            Some(items) => decode_value(items),
            None => Err(OrderEngineError::UnexpectedResponse(
                "list response without items".to_string(),
            )),
        },
        array @ Value::Array(_) => decode_value(array),
        other => Err(OrderEngineError::UnexpectedResponse(format!(
            "expected a list response, got {other}"
        ))),
    }
}

fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, OrderEngineError> {
    serde_json::from_value(value)
        .map_err(|e| OrderEngineError::UnexpectedResponse(format!("failed to decode response: {e}")))
}
