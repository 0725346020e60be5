//! Strategy Type Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named multi-leg option strategy shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Same expiry, same type, different strikes.
    Vertical,
    /// Call and put at the same strike.
    Straddle,
    /// Call and put at different strikes.
    Strangle,
    /// Put spread below a call spread.
    IronCondor,
    /// Three equally spaced strikes, body sold twice.
    Butterfly,
    /// Short straddle with long wings.
    IronButterfly,
    /// Same strike, different expiries.
    Calendar,
    /// Different strikes and expiries.
    Diagonal,
}

impl StrategyType {
    /// Number of legs the shape has.
    #[must_use]
    pub const fn leg_count(&self) -> usize {
        match self {
            Self::Vertical | Self::Calendar | Self::Diagonal | Self::Straddle | Self::Strangle => 2,
            Self::Butterfly => 3,
            Self::IronCondor | Self::IronButterfly => 4,
        }
    }

    /// Check if this is a defined-risk shape.
    #[must_use]
    pub const fn is_defined_risk(&self) -> bool {
        matches!(
            self,
            Self::Vertical | Self::Butterfly | Self::IronCondor | Self::IronButterfly
        )
    }

    /// Check if this shape spans several expiration dates.
    #[must_use]
    pub const fn is_multi_expiry(&self) -> bool {
        matches!(self, Self::Calendar | Self::Diagonal)
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical spread"),
            Self::Straddle => write!(f, "straddle"),
            Self::Strangle => write!(f, "strangle"),
            Self::IronCondor => write!(f, "iron condor"),
            Self::Butterfly => write!(f, "butterfly spread"),
            Self::IronButterfly => write!(f, "iron butterfly"),
            Self::Calendar => write!(f, "calendar spread"),
            Self::Diagonal => write!(f, "diagonal spread"),
        }
    }
}

/// Whether a symmetric strategy is bought or sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyDirection {
    /// Buy every leg.
    #[default]
    Long,
    /// Sell every leg.
    Short,
}
