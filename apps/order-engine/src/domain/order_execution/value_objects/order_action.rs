//! Leg action (what a leg does to a position).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PositionEffect;

/// Action of a single order leg.
///
/// Open/close actions carry position intent. `Buy` and `Sell` carry none and
/// are only accepted by the broker for equities and futures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    /// Buy to open a long position.
    #[serde(rename = "Buy to Open")]
    BuyToOpen,
    /// Sell to open a short position.
    #[serde(rename = "Sell to Open")]
    SellToOpen,
    /// Buy to close a short position.
    #[serde(rename = "Buy to Close")]
    BuyToClose,
    /// Sell to close a long position.
    #[serde(rename = "Sell to Close")]
    SellToClose,
    /// Buy without position intent.
    #[serde(rename = "Buy")]
    Buy,
    /// Sell without position intent.
    #[serde(rename = "Sell")]
    Sell,
}

impl OrderAction {
    /// Returns true if the action pays cash out of the account.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self, Self::BuyToOpen | Self::BuyToClose | Self::Buy)
    }

    /// Returns true if the action brings cash into the account.
    #[must_use]
    pub const fn is_sell(&self) -> bool {
        !self.is_buy()
    }

    /// Returns true if the action opens a position.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        matches!(self, Self::BuyToOpen | Self::SellToOpen)
    }

    /// Returns true if the action closes a position.
    #[must_use]
    pub const fn is_closing(&self) -> bool {
        matches!(self, Self::BuyToClose | Self::SellToClose)
    }

    /// Returns true if the action states whether it opens or closes.
    #[must_use]
    pub const fn has_position_intent(&self) -> bool {
        self.is_opening() || self.is_closing()
    }

    /// Position effect implied by the action.
    #[must_use]
    pub const fn implied_position_effect(&self) -> PositionEffect {
        match self {
            Self::BuyToOpen | Self::SellToOpen => PositionEffect::Opening,
            Self::BuyToClose | Self::SellToClose => PositionEffect::Closing,
            Self::Buy | Self::Sell => PositionEffect::Auto,
        }
    }

    /// Wire label used by the broker API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuyToOpen => "Buy to Open",
            Self::SellToOpen => "Sell to Open",
            Self::BuyToClose => "Buy to Close",
            Self::SellToClose => "Sell to Close",
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
