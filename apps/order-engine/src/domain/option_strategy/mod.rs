//! Option Strategy Bounded Context
//!
//! Turns option descriptors into well-formed multi-leg orders.
//!
//! | Strategy | Legs | Expiration | Strikes | Types |
//! |---|---|---|---|---|
//! | Vertical | 2 | same | different | same |
//! | Straddle | 2 | same | same | call + put |
//! | Strangle | 2 | same | different | call + put |
//! | Iron condor | 4 | same | long put < short put < short call < long call | 2 puts, 2 calls |
//! | Butterfly | 3 | same | equally spaced, body x2 | same |
//! | Iron butterfly | 4 | same | shared center, equal wings | 2 puts, 2 calls |
//! | Calendar | 2 | short before long | same | same |
//! | Diagonal | 2 | short before long | different | same |

mod builder;
mod option_descriptor;
mod rules;
mod strategy_type;

pub use builder::StrategyBuilder;
pub use option_descriptor::{OptionContract, OptionDescriptor, OptionType, occ_symbol};
pub use strategy_type::{StrategyDirection, StrategyType};
