//! Position effect of a leg.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a leg opens or closes a position.
///
/// `Auto` is passed through to the broker untouched; resolving it needs
/// position state this crate does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PositionEffect {
    /// Leg opens a position.
    Opening,
    /// Leg closes a position.
    Closing,
    /// Broker infers the effect.
    #[default]
    Auto,
}

impl PositionEffect {
    /// Returns true if the effect is left to the broker.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for PositionEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening => write!(f, "Opening"),
            Self::Closing => write!(f, "Closing"),
            Self::Auto => write!(f, "Auto"),
        }
    }
}
