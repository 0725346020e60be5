//! Tick-size schedules and price rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::OrderEngineError;

/// One band of a tick schedule, in the broker's `tick-sizes` format.
///
/// `value` applies to prices strictly below `threshold`; a band without a
/// threshold covers every remaining price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TickSize {
    /// Upper bound (exclusive) of the band.
    #[serde(default)]
    pub threshold: Option<Decimal>,
    /// Minimum increment inside the band.
    pub value: Decimal,
}

/// Ordered tick bands for an instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSchedule {
    bands: Vec<TickSize>,
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::penny()
    }
}

impl TickSchedule {
    /// Schedule from broker bands; an empty list means a flat penny tick.
    #[must_use]
    pub fn new(mut bands: Vec<TickSize>) -> Self {
        if bands.is_empty() {
            return Self::penny();
        }
        // Unbounded band last, the rest by ascending threshold.
        bands.sort_by(|a, b| match (a.threshold, b.threshold) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { bands }
    }

    /// Flat 0.01 increment.
    #[must_use]
    pub fn penny() -> Self {
        Self {
            bands: vec![TickSize {
                threshold: None,
                value: dec!(0.01),
            }],
        }
    }

    /// Bands in evaluation order.
    #[must_use]
    pub fn bands(&self) -> &[TickSize] {
        &self.bands
    }

    /// Increment that applies at `price`, if any band covers it.
    #[must_use]
    pub fn increment_for(&self, price: Decimal) -> Option<Decimal> {
        self.bands
            .iter()
            .find(|band| band.threshold.is_none_or(|threshold| price < threshold))
            .map(|band| band.value)
    }

    /// Round `price` to the nearest tick, midpoint away from zero.
    ///
    /// # Errors
    ///
    /// Fails when the price is not positive, no band covers it, the band's
    /// increment is not positive, or the price rounds to zero.
    pub fn round(&self, price: Decimal) -> Result<Decimal, OrderEngineError> {
        if price <= Decimal::ZERO {
            return Err(OrderEngineError::validation("price", "price must be positive"));
        }
        let Some(increment) = self.increment_for(price) else {
            return Err(OrderEngineError::validation(
                "price",
                format!("no tick size applies to price {price}"),
            ));
        };
        if increment <= Decimal::ZERO {
            return Err(OrderEngineError::validation(
                "price",
                format!("tick size {increment} for price {price} is not positive"),
            ));
        }

        let rounded = price
            .checked_div(increment)
            .map(|ticks| ticks.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|ticks| ticks.checked_mul(increment))
            .ok_or_else(|| {
                OrderEngineError::validation(
                    "price",
                    format!("price {price} cannot be expressed in ticks of {increment}"),
                )
            })?;
        if rounded <= Decimal::ZERO {
            return Err(OrderEngineError::validation(
                "price",
                format!("price {price} is below the minimum tick of {increment}"),
            ));
        }
        Ok(rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn option_schedule() -> TickSchedule {
        TickSchedule::new(vec![
            TickSize {
                threshold: None,
                value: dec!(0.05),
            },
            TickSize {
                threshold: Some(dec!(3)),
                value: dec!(0.01),
            },
        ])
    }

    #[test]
    fn bands_sorted_with_unbounded_last() {
        let schedule = option_schedule();
        assert_eq!(schedule.bands()[0].threshold, Some(dec!(3)));
        assert_eq!(schedule.bands()[1].threshold, None);
    }

    #[test_case(dec!(1.00), Some(dec!(0.01)) ; "below threshold")]
    #[test_case(dec!(2.99), Some(dec!(0.01)) ; "just below threshold")]
    #[test_case(dec!(3.00), Some(dec!(0.05)) ; "at threshold")]
    #[test_case(dec!(12.40), Some(dec!(0.05)) ; "above threshold")]
    fn increment_lookup(price: Decimal, expected: Option<Decimal>) {
        assert_eq!(option_schedule().increment_for(price), expected);
    }

    #[test_case(dec!(1.234), dec!(1.23) ; "rounds down below threshold")]
    #[test_case(dec!(1.235), dec!(1.24) ; "midpoint rounds away from zero")]
    #[test_case(dec!(3.12), dec!(3.10) ; "nickel band rounds down")]
    #[test_case(dec!(3.13), dec!(3.15) ; "nickel band rounds up")]
    #[test_case(dec!(4.05), dec!(4.05) ; "already on grid")]
    fn rounding(price: Decimal, expected: Decimal) {
        assert_eq!(option_schedule().round(price).unwrap(), expected);
    }

    #[test]
    fn non_positive_price_rejected() {
        assert!(option_schedule().round(dec!(0)).is_err());
        assert!(option_schedule().round(dec!(-1)).is_err());
    }

    #[test]
    fn price_below_half_tick_rejected() {
        let err = option_schedule().round(dec!(0.004)).unwrap_err();
        assert!(err.to_string().contains("minimum tick"));
    }

    #[test]
    fn uncovered_price_rejected() {
        let schedule = TickSchedule::new(vec![TickSize {
            threshold: Some(dec!(3)),
            value: dec!(0.01),
        }]);
        assert!(schedule.round(dec!(5)).is_err());
    }

    #[test]
    fn zero_increment_rejected() {
        let schedule = TickSchedule::new(vec![TickSize {
            threshold: None,
            value: Decimal::ZERO,
        }]);
        assert!(schedule.round(dec!(1)).is_err());
    }

    #[test]
    fn tick_count_overflow_rejected() {
        let schedule = TickSchedule::new(vec![TickSize {
            threshold: None,
            value: dec!(0.0000000001),
        }]);
        let err = schedule.round(Decimal::MAX).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::OrderValidationFailed);
        assert!(err.to_string().contains("cannot be expressed in ticks"));
    }

    #[test]
    fn empty_schedule_is_penny() {
        assert_eq!(TickSchedule::new(vec![]), TickSchedule::penny());
    }

    #[test]
    fn parses_broker_tick_sizes() {
        let json = serde_json::json!([
            {"threshold": "3.0", "value": "0.01"},
            {"value": "0.05"}
        ]);
        let bands: Vec<TickSize> = serde_json::from_value(json).unwrap();
        assert_eq!(TickSchedule::new(bands), option_schedule());
    }
}
