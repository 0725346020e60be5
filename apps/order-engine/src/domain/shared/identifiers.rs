//! Strongly-typed identifiers for broker entities.
//!
//! These prevent passing an account number where an order id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(OrderId, "Broker-assigned identifier of a submitted order.");
define_id!(AccountNumber, "Brokerage account number orders are routed to.");

// The broker encodes order ids as JSON numbers; accept both shapes.
impl OrderId {
    /// Build an id from a JSON value that may be a number or a string.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_display_and_as_str() {
        let id = OrderId::new("12345");
        assert_eq!(id.as_str(), "12345");
        assert_eq!(format!("{id}"), "12345");
    }

    #[test]
    fn account_number_from_str() {
        let acct: AccountNumber = "5WT00001".into();
        assert_eq!(acct.into_inner(), "5WT00001");
    }

    #[test]
    fn order_id_serde_is_transparent() {
        let id = OrderId::new("42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn order_id_from_json_number_or_string() {
        assert_eq!(
            OrderId::from_json(&serde_json::json!(9876)),
            Some(OrderId::new("9876"))
        );
        assert_eq!(
            OrderId::from_json(&serde_json::json!("abc")),
            Some(OrderId::new("abc"))
        );
        assert_eq!(OrderId::from_json(&serde_json::json!(null)), None);
        assert_eq!(OrderId::from_json(&serde_json::json!("")), None);
    }
}
