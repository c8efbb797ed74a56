//! Retry policies for HTTP requests.

use rand::Rng;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    None,
    /// Retry on transport failures, 429 and 5xx with exponential backoff.
    /// Every market-data endpoint is a GET, so this is the default.
    #[default]
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Resolved config, `None` when retries are disabled.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Backoff schedule for one request.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait before retry #1.
    pub initial_delay: Duration,
    /// Upper bound for any single wait.
    pub max_delay: Duration,
    /// Growth of the wait per retry.
    pub backoff_factor: f64,
    /// Spread each wait by up to ±25%.
    pub jitter: bool,
    /// Response statuses worth another attempt. Other 4xx fail immediately.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// Market-data API defaults: 3 retries, 2 s doubling up to 30 s.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 500, 502, 503, 504],
        }
    }

    /// Wait before retry number `attempt + 1`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self.backoff_factor.powi(attempt.min(i32::MAX as u32) as i32);
        let ms = (self.initial_delay.as_millis() as f64 * exp).min(self.max_delay.as_millis() as f64);
        let ms = if self.jitter {
            ms * rand::thread_rng().gen_range(0.75..=1.25)
        } else {
            ms
        };
        Duration::from_millis(ms.max(0.0) as u64)
    }
}
