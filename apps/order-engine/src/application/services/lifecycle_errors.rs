//! Translation of broker refusals of cancel and replace.
//!
//! The broker reports these refusals as 4xx answers whose text is free-form.
//! A structured error code is honoured first; the message text is only a
//! fallback heuristic. Text matching no known pattern becomes
//! [`OrderEngineError::LifecycleRejected`] carrying the message verbatim.
//! Anything that is not a 4xx refusal propagates unchanged.

use std::fmt;
use std::sync::OnceLock;

use regex::RegexSet;

use crate::application::ports::TransportError;
use crate::domain::shared::OrderId;
use crate::error::OrderEngineError;

/// Lifecycle operation being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOperation {
    /// Cancel.
    Cancel,
    /// Replace.
    Replace,
}

impl LifecycleOperation {
    /// Label used in errors and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refusal {
    AlreadyFilled,
    NotCancellable,
    NotEditable,
    InsufficientQuantity,
}

// Order matters: the first matching pattern wins.
const REFUSALS: [Refusal; 4] = [
    Refusal::AlreadyFilled,
    Refusal::InsufficientQuantity,
    Refusal::NotEditable,
    Refusal::NotCancellable,
];

#[allow(clippy::expect_used)] // Patterns are constant; expect() is safe here
fn message_patterns() -> &'static RegexSet {
    static PATTERNS: OnceLock<RegexSet> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        RegexSet::new([
            r"(?i)\balready\s+(?:been\s+)?filled\b|\bfully\s+filled\b",
            r"(?i)\binsufficient\s+(?:remaining\s+)?quantity\b|\bexceeds?\s+(?:the\s+)?remaining\b",
            r"(?i)\bnot\s+(?:editable|replaceable)\b|\bcannot\s+(?:be\s+)?(?:edited|replaced|modified)\b",
            r"(?i)\bnot\s+cancell?able\b|\bcannot\s+(?:be\s+)?cancell?ed\b|\bunable\s+to\s+cancel\b",
        ])
        .expect("lifecycle patterns are valid")
    })
}

fn refusal_from_code(code: &str) -> Option<Refusal> {
    let code = code.to_ascii_lowercase();
    if code.contains("already_filled") {
        Some(Refusal::AlreadyFilled)
    } else if code.contains("insufficient_quantity") {
        Some(Refusal::InsufficientQuantity)
    } else if code.contains("not_editable") || code.contains("not_replaceable") {
        Some(Refusal::NotEditable)
    } else if code.contains("not_cancellable") || code.contains("not_cancelable") {
        Some(Refusal::NotCancellable)
    } else {
        None
    }
}

fn refusal_from_message(message: &str) -> Option<Refusal> {
    message_patterns()
        .matches(message)
        .iter()
        .next()
        .map(|index| REFUSALS[index])
}

/// Map a transport failure of `operation` on `order_id` to an engine error.
pub fn translate_lifecycle_error(
    operation: LifecycleOperation,
    order_id: &OrderId,
    error: TransportError,
) -> OrderEngineError {
    let Some((code, message)) = error.rejection() else {
        return OrderEngineError::Transport(error);
    };

    let refusal = code
        .and_then(refusal_from_code)
        .or_else(|| refusal_from_message(message));

    let order_id_str = order_id.to_string();
    match refusal {
        Some(Refusal::AlreadyFilled) => OrderEngineError::OrderAlreadyFilled {
            order_id: order_id_str,
        },
        Some(Refusal::NotCancellable) => OrderEngineError::OrderNotCancellable {
            order_id: order_id_str,
            reason: message.to_string(),
        },
        Some(Refusal::NotEditable) => OrderEngineError::OrderNotEditable {
            order_id: order_id_str,
            reason: message.to_string(),
        },
        Some(Refusal::InsufficientQuantity) => OrderEngineError::InsufficientQuantity {
            order_id: order_id_str,
            reason: message.to_string(),
        },
        None => {
            tracing::warn!(
                operation = %operation,
                order_id = %order_id,
                code = ?code,
                message = %message,
                "Unrecognised lifecycle rejection"
            );
            OrderEngineError::LifecycleRejected {
                operation: operation.as_str(),
                order_id: order_id_str,
                message: message.to_string(),
            }
        }
    }
}
