//! Buying-power effect returned by a dry-run submission.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::value_objects::PriceEffect;

/// Read-only snapshot of the broker's buying-power computation.
///
/// Amounts are magnitudes; direction travels in the matching `*_effect`
/// field, the way the broker reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuyingPowerEffect {
    /// Change in margin requirement.
    #[serde(default)]
    pub change_in_margin_requirement: Option<Decimal>,
    /// Direction of the margin requirement change.
    #[serde(default)]
    pub change_in_margin_requirement_effect: Option<PriceEffect>,
    /// Change in buying power.
    #[serde(default)]
    pub change_in_buying_power: Option<Decimal>,
    /// Direction of the buying power change.
    #[serde(default)]
    pub change_in_buying_power_effect: Option<PriceEffect>,
    /// Buying power before the order.
    #[serde(default)]
    pub current_buying_power: Option<Decimal>,
    /// Direction of the current buying power.
    #[serde(default)]
    pub current_buying_power_effect: Option<PriceEffect>,
    /// Buying power after the order.
    #[serde(default)]
    pub new_buying_power: Option<Decimal>,
    /// Direction of the new buying power.
    #[serde(default)]
    pub new_buying_power_effect: Option<PriceEffect>,
    /// Margin requirement of the order in isolation.
    #[serde(default)]
    pub isolated_order_margin_requirement: Option<Decimal>,
    /// Whether the broker priced the order as a spread.
    #[serde(default)]
    pub is_spread: bool,
    /// Overall impact on buying power.
    #[serde(default)]
    pub impact: Option<Decimal>,
    /// Overall direction.
    #[serde(default)]
    pub effect: Option<PriceEffect>,
}
