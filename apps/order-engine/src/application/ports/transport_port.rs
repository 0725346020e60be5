//! Transport Port (Driven Port)
//!
//! Authenticated JSON access to the brokerage REST API. Session handling,
//! retries and timeouts belong to the adapter; the core never retries.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Query parameters, in order. Repeated keys are allowed.
pub type QueryParams = Vec<(String, String)>;

/// Errors raised by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection could not be established or was dropped.
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded its deadline.
    #[error("Request timed out")]
    Timeout,

    /// Broker answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Broker error code, when one was returned.
        code: Option<String>,
        /// Broker error message.
        message: String,
    },

    /// Response body was not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Session token missing or refused.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Rate limited and out of retries.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested delay in seconds.
        retry_after_secs: u64,
    },

    /// Retryable failures persisted.
    #[error("Max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded {
        /// Attempts made.
        attempts: u32,
    },
}

impl TransportError {
    /// Returns true for a 4xx answer, i.e. the broker refused the request.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 400 && *status < 500)
    }

    /// Returns true for a 404 answer.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Broker message and code of a rejection.
    #[must_use]
    pub fn rejection(&self) -> Option<(Option<&str>, &str)> {
        match self {
            Self::Api { code, message, .. } if self.is_rejection() => {
                Some((code.as_deref(), message.as_str()))
            }
            _ => None,
        }
    }
}

/// Authenticated JSON transport.
#[async_trait]
pub trait TransportPort: Send + Sync {
    /// GET `path` with query parameters.
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportError>;

    /// POST a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// PUT a JSON body.
    async fn put(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// DELETE `path`.
    async fn delete(&self, path: &str) -> Result<(), TransportError>;
}
