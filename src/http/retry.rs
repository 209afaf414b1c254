//! Retry logic with exponential backoff
//!
//! Transient server-side failures are retried with exponential backoff
//! delays between attempts. Only statuses that can plausibly succeed on
//! a replay are retried (500, 502-504 and the 520-522 CDN statuses);
//! client errors and rate limits fail immediately so the caller can
//! react.

use std::time::Duration;

use crate::constants::{DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_BACKOFF_MS, DEFAULT_MAX_RETRIES};

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt)
    pub max_attempts: u32,
    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds (cap for exponential growth)
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRIES,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Check if an HTTP status code should be retried
    pub fn is_retriable_status(&self, status_code: u16) -> bool {
        matches!(status_code, 500 | 502 | 503 | 504 | 520..=522)
    }

    /// Calculate backoff delay for a given attempt number (0-indexed);
    /// the first attempt runs immediately.
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_millis(0);
        }

        // initial_backoff * 2^(attempt-1), capped
        let backoff_ms = self
            .initial_backoff_ms
            .saturating_mul(2u64.saturating_pow(attempt - 1))
            .min(self.max_backoff_ms);

        Duration::from_millis(backoff_ms)
    }

    /// Whether to retry given the current attempt number and status.
    pub fn should_retry(&self, attempt: u32, status_code: u16) -> bool {
        if attempt + 1 >= self.max_attempts {
            return false;
        }

        self.is_retriable_status(status_code)
    }
}
