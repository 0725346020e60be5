//! Instrument type traded by a leg.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of instrument a leg trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Common stock or ETF.
    Equity,
    /// Option on an equity.
    #[serde(rename = "Equity Option")]
    EquityOption,
    /// Futures contract.
    Future,
    /// Option on a futures contract.
    #[serde(rename = "Future Option")]
    FutureOption,
}

impl InstrumentType {
    /// Returns true for option instruments.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self, Self::EquityOption | Self::FutureOption)
    }

    /// Returns true for futures and futures options.
    #[must_use]
    pub const fn is_futures_product(&self) -> bool {
        matches!(self, Self::Future | Self::FutureOption)
    }

    /// Wire label used by the broker API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::EquityOption => "Equity Option",
            Self::Future => "Future",
            Self::FutureOption => "Future Option",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
