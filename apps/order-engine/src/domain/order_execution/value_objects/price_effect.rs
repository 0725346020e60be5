//! Direction of the net cash flow of an order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Net cash direction of an order from the account's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceEffect {
    /// Cash leaves the account.
    Debit,
    /// Cash enters the account.
    Credit,
}

impl PriceEffect {
    /// Effect of a net cash flow; negative flows are debits, everything else a credit.
    #[must_use]
    pub fn from_cash_flow(net: rust_decimal::Decimal) -> Self {
        if net.is_sign_negative() && !net.is_zero() {
            Self::Debit
        } else {
            Self::Credit
        }
    }

    /// The opposite effect.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl fmt::Display for PriceEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "Debit"),
            Self::Credit => write!(f, "Credit"),
        }
    }
}
