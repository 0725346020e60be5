//! Buying Power Bounded Context
//!
//! Interprets the broker's dry-run buying-power effect.

mod buying_power_effect;
mod evaluator;

pub use buying_power_effect::BuyingPowerEffect;
pub use evaluator::BuyingPowerEvaluator;
