//! Time in force for orders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time in force specifying order validity duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Valid for current trading day only.
    #[default]
    #[serde(rename = "Day")]
    Day,
    /// Good-til-canceled.
    Gtc,
    /// Good-til-date (requires a `gtc_date` on the order).
    Gtd,
    /// Immediate-or-cancel (fill immediately, cancel remainder).
    Ioc,
}

impl TimeInForce {
    /// Returns true if the order can persist across trading sessions.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        matches!(self, Self::Gtc | Self::Gtd)
    }

    /// Returns true if the order needs an expiry date.
    #[must_use]
    pub const fn requires_date(&self) -> bool {
        matches!(self, Self::Gtd)
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "Day"),
            Self::Gtc => write!(f, "GTC"),
            Self::Gtd => write!(f, "GTD"),
            Self::Ioc => write!(f, "IOC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence() {
        assert!(!TimeInForce::Day.is_persistent());
        assert!(TimeInForce::Gtc.is_persistent());
        assert!(TimeInForce::Gtd.is_persistent());
        assert!(!TimeInForce::Ioc.is_persistent());
    }

    #[test]
    fn only_gtd_requires_date() {
        assert!(TimeInForce::Gtd.requires_date());
        assert!(!TimeInForce::Gtc.requires_date());
    }

    // The broker spells the session order "Day" but the others in capitals.
    #[test]
    fn serde_labels() {
        assert_eq!(serde_json::to_string(&TimeInForce::Gtc).unwrap(), "\"GTC\"");
        assert_eq!(serde_json::to_string(&TimeInForce::Day).unwrap(), "\"Day\"");
        let parsed: TimeInForce = serde_json::from_str("\"IOC\"").unwrap();
        assert_eq!(parsed, TimeInForce::Ioc);
    }
}
