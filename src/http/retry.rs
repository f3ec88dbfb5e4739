//! Retry policy for gateway requests.

use crate::error::HttpError;
use crate::http::request::HttpRequest;
use std::time::Duration;

/// Status returned by an upstream proxy that gave up waiting.
pub const GATEWAY_TIMEOUT: u16 = 504;

/// Configuration for retry behavior.
///
/// A request is retried only when it opted in (`should_retry`), it has used
/// fewer than `max_retries` retries, and the failure is a server error whose
/// status is listed in `retryable_statuses`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
    /// Server error statuses that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    /// Gateway-timeout only, re-issued immediately.
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_factor: 1.0,
            jitter: false,
            retryable_statuses: vec![GATEWAY_TIMEOUT],
        }
    }
}

impl RetryConfig {
    /// Gateway-timeout retries with capped exponential backoff.
    pub fn exponential() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![GATEWAY_TIMEOUT],
        }
    }

    /// Whether `request` should be re-issued after failing with `error`.
    pub fn should_retry(&self, request: &HttpRequest, error: &HttpError) -> bool {
        match error {
            HttpError::Server { status, .. } => {
                request.should_retry
                    && request.retry_attempts < self.max_retries
                    && self.retryable_statuses.contains(status)
            }
            _ => false,
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}
