//! Order status in the broker lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase an [`OrderStatus`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderPhase {
    /// Accepted by the API, not yet working at the exchange.
    Submission,
    /// Working at the exchange (may have a pending cancel/replace).
    Working,
    /// No further transitions.
    Terminal,
}

/// Order status as reported by the broker.
///
/// ```text
/// Received -> {Routed, InFlight, Contingent} -> Live
/// Live -> {CancelRequested, ReplaceRequested}
/// * -> {Filled, Cancelled, Rejected, Expired, Removed, PartiallyRemoved}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Received by the broker.
    Received,
    /// Routed towards an exchange.
    Routed,
    /// In transit to the exchange.
    #[serde(rename = "In Flight")]
    InFlight,
    /// Waiting on a trigger from another order.
    Contingent,
    /// Working at the exchange.
    Live,
    /// Cancel submitted, awaiting confirmation.
    #[serde(rename = "Cancel Requested")]
    CancelRequested,
    /// Replace submitted, awaiting confirmation.
    #[serde(rename = "Replace Requested")]
    ReplaceRequested,
    /// Completely filled.
    Filled,
    /// Cancelled.
    Cancelled,
    /// Rejected by the broker or exchange.
    Rejected,
    /// Expired (e.g. Day order at the close).
    Expired,
    /// Removed by the broker.
    Removed,
    /// Partially filled, remainder removed by the broker.
    #[serde(rename = "Partially Removed")]
    PartiallyRemoved,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 13] = [
        Self::Received,
        Self::Routed,
        Self::InFlight,
        Self::Contingent,
        Self::Live,
        Self::CancelRequested,
        Self::ReplaceRequested,
        Self::Filled,
        Self::Cancelled,
        Self::Rejected,
        Self::Expired,
        Self::Removed,
        Self::PartiallyRemoved,
    ];

    /// Lifecycle phase of this status.
    #[must_use]
    pub const fn phase(&self) -> OrderPhase {
        match self {
            Self::Received | Self::Routed | Self::InFlight | Self::Contingent => {
                OrderPhase::Submission
            }
            Self::Live | Self::CancelRequested | Self::ReplaceRequested => OrderPhase::Working,
            Self::Filled
            | Self::Cancelled
            | Self::Rejected
            | Self::Expired
            | Self::Removed
            | Self::PartiallyRemoved => OrderPhase::Terminal,
        }
    }

    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.phase(), OrderPhase::Terminal)
    }

    /// Returns true if the order is working at the exchange.
    #[must_use]
    pub const fn is_working(&self) -> bool {
        matches!(self.phase(), OrderPhase::Working)
    }

    /// Returns true if the order can be cancelled or replaced.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Returns true if the order is completely filled.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Filled)
    }

    /// Wire label used by the broker API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::Routed => "Routed",
            Self::InFlight => "In Flight",
            Self::Contingent => "Contingent",
            Self::Live => "Live",
            Self::CancelRequested => "Cancel Requested",
            Self::ReplaceRequested => "Replace Requested",
            Self::Filled => "Filled",
            Self::Cancelled => "Cancelled",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
            Self::Removed => "Removed",
            Self::PartiallyRemoved => "Partially Removed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_phase() {
        for status in [
            OrderStatus::Received,
            OrderStatus::Routed,
            OrderStatus::InFlight,
            OrderStatus::Contingent,
        ] {
            assert_eq!(status.phase(), OrderPhase::Submission, "{status}");
        }
    }

    #[test]
    fn working_phase() {
        assert!(OrderStatus::Live.is_working());
        assert!(OrderStatus::CancelRequested.is_working());
        assert!(OrderStatus::ReplaceRequested.is_working());
        assert!(!OrderStatus::Routed.is_working());
    }

    #[test]
    fn terminal_phase() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(OrderStatus::Expired.is_terminal());
        assert!(OrderStatus::Removed.is_terminal());
        assert!(OrderStatus::PartiallyRemoved.is_terminal());
        assert!(!OrderStatus::Live.is_terminal());
    }

    #[test]
    fn only_live_is_live() {
        let live: Vec<_> = OrderStatus::ALL.iter().filter(|s| s.is_live()).collect();
        assert_eq!(live, vec![&OrderStatus::Live]);
    }

    #[test]
    fn display_matches_wire_label() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn serde_parses_broker_labels() {
        let parsed: OrderStatus = serde_json::from_str("\"Cancel Requested\"").unwrap();
        assert_eq!(parsed, OrderStatus::CancelRequested);
        assert!(serde_json::from_str::<OrderStatus>("\"Working\"").is_err());
    }
}
