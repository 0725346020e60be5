//! HTTP transport with retry logic.
//!
//! Retries 429 answers and connect failures with exponential backoff. 408,
//! 5xx and dropped connections are retried for GET and DELETE only: a POST or
//! PUT the broker may already have processed is never sent twice, since that
//! could place a second order. Everything else is returned to the caller on
//! the first attempt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::{QueryParams, TransportError, TransportPort};
use crate::config::{ApiConfig, RetryConfig};

/// Broker error envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Authenticated JSON transport over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session_token: String,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a transport from config.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed` without a session token, `Network` if the
    /// client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        if config.session_token.is_empty() {
            return Err(TransportError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_token: config.session_token.clone(),
            retry_config: config.retry.clone(),
        })
    }

    /// Internal request implementation with retry logic.
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let mut backoff = ExponentialBackoff::new(&self.retry_config);
        let replay_safe = is_idempotent(&method);

        loop {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(header::AUTHORIZATION, &self.session_token)
                .header(header::ACCEPT, "application/json");
            if !params.is_empty() {
                request = request.query(params);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) if e.is_timeout() => return Err(TransportError::Timeout),
                // A request that never connected cannot have reached the broker.
                Err(e) if replay_safe || e.is_connect() => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(TransportError::Network(e.to_string()));
                }
                Err(e) => return Err(TransportError::Network(e.to_string())),
            };

            let status = response.status();

            if status.is_success() {
                let text = response.text().await.map_err(|e| {
                    if e.is_timeout() {
                        TransportError::Timeout
                    } else {
                        TransportError::Network(e.to_string())
                    }
                })?;
                if text.trim().is_empty() {
                    return Ok(Value::Null);
                }
                return serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()));
            }

            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let error_body = response.text().await.unwrap_or_default();
            let (code, message) = parse_error_body(status, &error_body);

            match categorize_status(status, replay_safe) {
                ErrorCategory::RateLimited => {
                    // Retry-After wins over the computed delay but still spends an attempt.
                    let delay = backoff
                        .next_backoff()
                        .map(|computed| retry_after.map_or(computed, Duration::from_secs));
                    if let Some(delay) = delay {
                        tracing::warn!(
                            code = ?code,
                            delay_ms = delay.as_millis(),
                            "Rate limited, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(TransportError::RateLimited {
                        retry_after_secs: retry_after.unwrap_or(60),
                    });
                }
                ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            status = status.as_u16(),
                            message = %message,
                            delay_ms = delay.as_millis(),
                            "Retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(TransportError::MaxRetriesExceeded {
                        attempts: backoff.attempt,
                    });
                }
                ErrorCategory::NonRetryable => {
                    return match status {
                        StatusCode::UNAUTHORIZED => Err(TransportError::AuthenticationFailed),
                        _ => Err(TransportError::Api {
                            status: status.as_u16(),
                            code,
                            message,
                        }),
                    };
                }
            }
        }
    }
}

#[async_trait]
impl TransportPort for HttpTransport {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportError> {
        self.request(Method::GET, path, params, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.request(Method::POST, path, &QueryParams::new(), Some(body))
            .await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.request(Method::PUT, path, &QueryParams::new(), Some(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), TransportError> {
        self.request(Method::DELETE, path, &QueryParams::new(), None)
            .await
            .map(|_| ())
    }
}

/// Pull code and message out of an error body, falling back to raw text.
fn parse_error_body(status: StatusCode, body: &str) -> (Option<String>, String) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let ErrorBody {
                code,
                message,
                errors,
            } = envelope.error;
            let details: Vec<String> = errors.into_iter().filter_map(|d| d.message).collect();
            let message = match (message, details.is_empty()) {
                (Some(m), true) => m,
                (Some(m), false) => format!("{m}: {}", details.join("; ")),
                (None, false) => details.join("; "),
                (None, true) => status.to_string(),
            };
            (code, message)
        }
        Err(_) if body.trim().is_empty() => (None, status.to_string()),
        Err(_) => (None, body.to_string()),
    }
}

/// Error category for determining retry behavior.
enum ErrorCategory {
    RateLimited,
    Retryable,
    NonRetryable,
}

/// Categorize HTTP status code for retry handling.
///
/// 429 means the request was refused unprocessed, so any method may retry it.
const fn categorize_status(status: StatusCode, replay_safe: bool) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 if replay_safe => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}

/// Methods whose replay cannot create a second order.
fn is_idempotent(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE
}

/// Exponential backoff calculator.
struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
}

impl ExponentialBackoff {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 0,
            max_attempts: config.max_attempts,
            current_backoff: config.initial_backoff(),
            max_backoff: config.max_backoff(),
            multiplier: config.multiplier,
        }
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let backoff = self.current_backoff;
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(backoff)
    }
}
