//! Retry policy with exponential backoff and attempt classification.

use reqwest::StatusCode;
use std::time::Duration;

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Delay before the first retry in milliseconds. Doubled for each further retry.
pub const DEFAULT_INITIAL_RETRY_DELAY_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait before retry number `retry` (0-based): `initial_delay * 2^retry`.
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(factor)
    }
}

/// Only server errors are worth another attempt. Redirects and client
/// errors come back to the caller as they are.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error()
}

/// Why a single attempt did not produce a usable response.
#[derive(Debug)]
pub enum AttemptFailure {
    /// No response at all (connection refused, DNS, timeout, ...).
    Transport(reqwest::Error),
    /// The server answered with a 5xx status.
    ServerError(StatusCode),
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::Transport(e) => write!(f, "HTTP request failed: {}", e),
            AttemptFailure::ServerError(status) => write!(f, "Error from API server: {}", status),
        }
    }
}

impl std::error::Error for AttemptFailure {}
