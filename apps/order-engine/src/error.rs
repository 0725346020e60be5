//! Error taxonomy for the order engine.
//!
//! Every fallible operation in the crate returns [`OrderEngineError`]. Each
//! variant maps to a stable [`ErrorCode`] so callers can branch on a machine
//! readable reason without matching on message text.
//!
//! | Code | Raised by |
//! |------|-----------|
//! | `INVALID_OPTION` | strategy construction (expired or malformed option) |
//! | `INVALID_STRATEGY` | strategy construction (structural rule violated) |
//! | `INVALID_SYMBOL` | validation step 1 |
//! | `ORDER_VALIDATION_FAILED` | order construction, validation steps 2-5 |
//! | `ORDER_NOT_CANCELLABLE` | cancel |
//! | `ORDER_ALREADY_FILLED` | cancel |
//! | `ORDER_NOT_EDITABLE` | replace |
//! | `INSUFFICIENT_QUANTITY` | replace |
//! | `LIFECYCLE_REJECTED` | cancel/replace rejections with unrecognised text |
//! | `UNEXPECTED_RESPONSE` | broker answers that break the protocol |
//! | `TRANSPORT_ERROR` | anything the transport raised |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::TransportError;
use crate::domain::option_strategy::StrategyType;

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Expired or malformed option descriptor.
    InvalidOption,
    /// Strategy structural invariant violated.
    InvalidStrategy,
    /// Symbol unknown or not tradable.
    InvalidSymbol,
    /// Quantity, price, permission or buying power check failed.
    OrderValidationFailed,
    /// Order cannot be cancelled in its current status.
    OrderNotCancellable,
    /// Order already filled.
    OrderAlreadyFilled,
    /// Order cannot be replaced.
    OrderNotEditable,
    /// Replacement asks for more than remains unfilled.
    InsufficientQuantity,
    /// Broker refused a lifecycle operation for an unrecognised reason.
    LifecycleRejected,
    /// Broker response contradicts the protocol.
    UnexpectedResponse,
    /// Transport failure.
    TransportError,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidOption => "INVALID_OPTION",
            Self::InvalidStrategy => "INVALID_STRATEGY",
            Self::InvalidSymbol => "INVALID_SYMBOL",
            Self::OrderValidationFailed => "ORDER_VALIDATION_FAILED",
            Self::OrderNotCancellable => "ORDER_NOT_CANCELLABLE",
            Self::OrderAlreadyFilled => "ORDER_ALREADY_FILLED",
            Self::OrderNotEditable => "ORDER_NOT_EDITABLE",
            Self::InsufficientQuantity => "INSUFFICIENT_QUANTITY",
            Self::LifecycleRejected => "LIFECYCLE_REJECTED",
            Self::UnexpectedResponse => "UNEXPECTED_RESPONSE",
            Self::TransportError => "TRANSPORT_ERROR",
        }
    }

    /// Returns true for errors raised before anything reaches the broker.
    #[must_use]
    pub const fn is_pre_submission(&self) -> bool {
        matches!(
            self,
            Self::InvalidOption
                | Self::InvalidStrategy
                | Self::InvalidSymbol
                | Self::OrderValidationFailed
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Errors raised by the order engine.
#[derive(Debug, Error)]
pub enum OrderEngineError {
    /// Option descriptor is expired or malformed.
    #[error("Invalid option {symbol}: {reason}")]
    InvalidOption {
        /// Option symbol.
        symbol: String,
        /// Violated rule.
        reason: String,
    },

    /// Strategy structural rule violated.
    #[error("Invalid {strategy}: {reason}")]
    InvalidStrategy {
        /// Strategy being built.
        strategy: StrategyType,
        /// Violated rule.
        reason: String,
    },

    /// Symbol does not resolve to an active instrument.
    #[error("Invalid symbol '{symbol}': {reason}")]
    InvalidSymbol {
        /// Offending symbol.
        symbol: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Generic validation failure.
    #[error("Order validation failed on {field}: {reason}")]
    OrderValidation {
        /// Field or check that failed.
        field: String,
        /// Violated rule.
        reason: String,
    },

    /// Order is not in a cancellable status.
    #[error("Order {order_id} is not cancellable: {reason}")]
    OrderNotCancellable {
        /// Order id.
        order_id: String,
        /// Why the cancel was refused.
        reason: String,
    },

    /// Order is already filled.
    #[error("Order {order_id} is already filled")]
    OrderAlreadyFilled {
        /// Order id.
        order_id: String,
    },

    /// Order cannot be replaced.
    #[error("Order {order_id} is not editable: {reason}")]
    OrderNotEditable {
        /// Order id.
        order_id: String,
        /// Why it cannot be edited.
        reason: String,
    },

    /// Replacement quantity exceeds the unfilled remainder.
    #[error("Insufficient quantity to replace order {order_id}: {reason}")]
    InsufficientQuantity {
        /// Order id.
        order_id: String,
        /// Which leg ran short, when known.
        reason: String,
    },

    /// Broker refused a cancel/replace with text matching no known pattern.
    #[error("Broker rejected {operation} of order {order_id}: {message}")]
    LifecycleRejected {
        /// `cancel` or `replace`.
        operation: &'static str,
        /// Order id.
        order_id: String,
        /// Broker message, verbatim.
        message: String,
    },

    /// Broker response contradicts the protocol.
    #[error("Unexpected broker response: {0}")]
    UnexpectedResponse(String),

    /// Transport failure, propagated unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl OrderEngineError {
    /// Shorthand for [`OrderEngineError::OrderValidation`].
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OrderValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`OrderEngineError::InvalidStrategy`].
    pub fn strategy(strategy: StrategyType, reason: impl Into<String>) -> Self {
        Self::InvalidStrategy {
            strategy,
            reason: reason.into(),
        }
    }

    /// Stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidOption { .. } => ErrorCode::InvalidOption,
            Self::InvalidStrategy { .. } => ErrorCode::InvalidStrategy,
            Self::InvalidSymbol { .. } => ErrorCode::InvalidSymbol,
            Self::OrderValidation { .. } => ErrorCode::OrderValidationFailed,
            Self::OrderNotCancellable { .. } => ErrorCode::OrderNotCancellable,
            Self::OrderAlreadyFilled { .. } => ErrorCode::OrderAlreadyFilled,
            Self::OrderNotEditable { .. } => ErrorCode::OrderNotEditable,
            Self::InsufficientQuantity { .. } => ErrorCode::InsufficientQuantity,
            Self::LifecycleRejected { .. } => ErrorCode::LifecycleRejected,
            Self::UnexpectedResponse(_) => ErrorCode::UnexpectedResponse,
            Self::Transport(_) => ErrorCode::TransportError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::value_objects::OrderStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn error_code_reason() {
        assert_eq!(ErrorCode::InvalidSymbol.reason(), "INVALID_SYMBOL");
        assert_eq!(
            ErrorCode::InsufficientQuantity.to_string(),
            "INSUFFICIENT_QUANTITY"
        );
    }

    #[test]
    fn pre_submission_codes() {
        assert!(ErrorCode::InvalidOption.is_pre_submission());
        assert!(ErrorCode::OrderValidationFailed.is_pre_submission());
        assert!(!ErrorCode::OrderNotCancellable.is_pre_submission());
        assert!(!ErrorCode::TransportError.is_pre_submission());
    }

    #[test]
    fn messages_name_the_rule() {
        let err = OrderEngineError::strategy(StrategyType::IronButterfly, "wing widths must be equal");
        assert_eq!(err.to_string(), "Invalid iron butterfly: wing widths must be equal");
        assert_eq!(err.code(), ErrorCode::InvalidStrategy);

        let err = OrderEngineError::validation("quantity", "must be at least 1");
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn insufficient_quantity_message() {
        let err = OrderEngineError::InsufficientQuantity {
            order_id: "12".to_string(),
            reason: format!("AAPL asks for {} but only {} remains", dec!(100), dec!(50)),
        };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn transport_errors_convert() {
        let err: OrderEngineError = TransportError::Timeout.into();
        assert_eq!(err.code(), ErrorCode::TransportError);
    }

    #[test]
    fn not_cancellable_names_status() {
        let err = OrderEngineError::OrderNotCancellable {
            order_id: "7".to_string(),
            reason: format!("status is {}", OrderStatus::Routed),
        };
        assert_eq!(err.to_string(), "Order 7 is not cancellable: status is Routed");
    }
}
