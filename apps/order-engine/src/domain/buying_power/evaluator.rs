//! Buying Power Evaluator
//!
//! Pure interpretation of a [`BuyingPowerEffect`]. Percentages are rounded
//! to two decimal places, midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

use super::BuyingPowerEffect;
use crate::domain::order_execution::value_objects::PriceEffect;

/// Interprets a buying-power effect.
#[derive(Debug, Clone, Copy)]
pub struct BuyingPowerEvaluator<'a> {
    effect: &'a BuyingPowerEffect,
}

impl<'a> BuyingPowerEvaluator<'a> {
    /// Evaluate `effect`.
    #[must_use]
    pub const fn new(effect: &'a BuyingPowerEffect) -> Self {
        Self { effect }
    }

    /// Magnitude of the change, preferring `change_in_buying_power` over `impact`.
    #[must_use]
    pub fn change_amount(&self) -> Decimal {
        self.effect
            .change_in_buying_power
            .or(self.effect.impact)
            .map_or(Decimal::ZERO, |amount| amount.abs())
    }

    /// Share of current buying power the order uses, in percent.
    ///
    /// Zero when current buying power is absent or not positive. Saturates at
    /// `Decimal::MAX` when the ratio is too large to represent.
    #[must_use]
    pub fn usage_percentage(&self) -> Decimal {
        let current = match self.effect.current_buying_power {
            Some(current) if current > Decimal::ZERO => current,
            _ => return Decimal::ZERO,
        };
        self.change_amount()
            .checked_div(current)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::MAX, |pct| {
                pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            })
    }

    /// True iff usage is strictly above `threshold_pct`.
    #[must_use]
    pub fn exceeds_threshold(&self, threshold_pct: Decimal) -> bool {
        self.usage_percentage() > threshold_pct
    }

    /// True if the order consumes buying power.
    #[must_use]
    pub fn is_debit(&self) -> bool {
        match self.effect.effect {
            Some(effect) => effect == PriceEffect::Debit,
            None => self.signed_change().is_some_and(|c| c < Decimal::ZERO),
        }
    }

    /// True if the order frees buying power.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        match self.effect.effect {
            Some(effect) => effect == PriceEffect::Credit,
            None => self.signed_change().is_some_and(|c| c > Decimal::ZERO),
        }
    }

    /// New buying power with its direction applied.
    #[must_use]
    pub fn signed_new_buying_power(&self) -> Option<Decimal> {
        let value = self.effect.new_buying_power?;
        Some(apply_effect(value, self.effect.new_buying_power_effect))
    }

    /// True if buying power after the order would be negative.
    #[must_use]
    pub fn would_go_negative(&self) -> bool {
        self.signed_new_buying_power()
            .is_some_and(|bp| bp < Decimal::ZERO)
    }

    fn signed_change(&self) -> Option<Decimal> {
        match self.effect.change_in_buying_power {
            Some(change) => Some(apply_effect(
                change,
                self.effect.change_in_buying_power_effect,
            )),
            None => self.effect.impact,
        }
    }
}

// Explicit negatives win; otherwise a Debit direction flips the magnitude.
fn apply_effect(value: Decimal, effect: Option<PriceEffect>) -> Decimal {
    if value < Decimal::ZERO {
        value
    } else if effect == Some(PriceEffect::Debit) {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn effect(change: Option<Decimal>, impact: Option<Decimal>, current: Option<Decimal>) -> BuyingPowerEffect {
        BuyingPowerEffect {
            change_in_buying_power: change,
            impact,
            current_buying_power: current,
            ..Default::default()
        }
    }

    #[test]
    fn usage_percentage_rounds_to_two_places() {
        let e = effect(Some(dec!(1000)), None, Some(dec!(3000)));
        assert_eq!(BuyingPowerEvaluator::new(&e).usage_percentage(), dec!(33.33));

        let e = effect(Some(dec!(2000)), None, Some(dec!(3000)));
        assert_eq!(BuyingPowerEvaluator::new(&e).usage_percentage(), dec!(66.67));
    }

    #[test]
    fn usage_zero_without_current_buying_power() {
        let e = effect(Some(dec!(100)), None, None);
        assert_eq!(BuyingPowerEvaluator::new(&e).usage_percentage(), Decimal::ZERO);

        let e = effect(Some(dec!(100)), None, Some(Decimal::ZERO));
        assert_eq!(BuyingPowerEvaluator::new(&e).usage_percentage(), Decimal::ZERO);
    }

    #[test]
    fn usage_saturates_instead_of_overflowing() {
        let e = effect(Some(Decimal::MAX), None, Some(dec!(0.0000001)));
        let evaluator = BuyingPowerEvaluator::new(&e);
        assert_eq!(evaluator.usage_percentage(), Decimal::MAX);
        assert!(evaluator.exceeds_threshold(dec!(80)));

        let e = effect(Some(dec!(1000000000000000000)), None, Some(dec!(0.000000000001)));
        assert_eq!(BuyingPowerEvaluator::new(&e).usage_percentage(), Decimal::MAX);
    }

    #[test]
    fn change_amount_prefers_change_field() {
        let e = effect(Some(dec!(-250)), Some(dec!(999)), None);
        assert_eq!(BuyingPowerEvaluator::new(&e).change_amount(), dec!(250));

        let e = effect(None, Some(dec!(-75.5)), None);
        assert_eq!(BuyingPowerEvaluator::new(&e).change_amount(), dec!(75.5));

        let e = effect(None, None, None);
        assert_eq!(BuyingPowerEvaluator::new(&e).change_amount(), Decimal::ZERO);
    }

    #[test]
    fn threshold_is_strict() {
        let e = effect(Some(dec!(80)), None, Some(dec!(100)));
        let eval = BuyingPowerEvaluator::new(&e);
        assert_eq!(eval.usage_percentage(), dec!(80));
        assert!(!eval.exceeds_threshold(dec!(80)));
        assert!(eval.exceeds_threshold(dec!(79.99)));
    }

    #[test]
    fn explicit_effect_wins_over_sign() {
        let mut e = effect(Some(dec!(100)), None, None);
        e.effect = Some(PriceEffect::Debit);
        let eval = BuyingPowerEvaluator::new(&e);
        assert!(eval.is_debit());
        assert!(!eval.is_credit());
    }

    #[test]
    fn sign_inferred_without_effect() {
        let e = effect(Some(dec!(-100)), None, None);
        assert!(BuyingPowerEvaluator::new(&e).is_debit());

        let e = effect(None, Some(dec!(40)), None);
        assert!(BuyingPowerEvaluator::new(&e).is_credit());

        let mut e = effect(Some(dec!(100)), None, None);
        e.change_in_buying_power_effect = Some(PriceEffect::Debit);
        assert!(BuyingPowerEvaluator::new(&e).is_debit());

        let e = effect(None, None, None);
        let eval = BuyingPowerEvaluator::new(&e);
        assert!(!eval.is_debit() && !eval.is_credit());
    }

    #[test]
    fn new_buying_power_sign() {
        let mut e = BuyingPowerEffect {
            new_buying_power: Some(dec!(1200)),
            new_buying_power_effect: Some(PriceEffect::Debit),
            ..Default::default()
        };
        let eval = BuyingPowerEvaluator::new(&e);
        assert_eq!(eval.signed_new_buying_power(), Some(dec!(-1200)));
        assert!(eval.would_go_negative());

        e.new_buying_power_effect = Some(PriceEffect::Credit);
        assert!(!BuyingPowerEvaluator::new(&e).would_go_negative());

        e.new_buying_power = Some(dec!(-5));
        assert!(BuyingPowerEvaluator::new(&e).would_go_negative());

        e.new_buying_power = None;
        assert!(!BuyingPowerEvaluator::new(&e).would_go_negative());
    }

    proptest! {
        #[test]
        fn usage_is_never_negative(
            change in -1_000_000i64..1_000_000,
            current in -1_000_000i64..1_000_000,
        ) {
            let e = effect(Some(Decimal::from(change)), None, Some(Decimal::from(current)));
            let usage = BuyingPowerEvaluator::new(&e).usage_percentage();
            prop_assert!(usage >= Decimal::ZERO);
            if current <= 0 {
                prop_assert_eq!(usage, Decimal::ZERO);
            }
        }

        #[test]
        fn exceeds_threshold_matches_strict_comparison(
            change in 0i64..100_000,
            current in 1i64..100_000,
            threshold in 0u32..20_000,
        ) {
            let e = effect(Some(Decimal::from(change)), None, Some(Decimal::from(current)));
            let eval = BuyingPowerEvaluator::new(&e);
            let threshold = Decimal::new(i64::from(threshold), 2);
            prop_assert_eq!(eval.exceeds_threshold(threshold), eval.usage_percentage() > threshold);
        }
    }
}
