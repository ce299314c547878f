use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;

/// Retry policy shared by the outbound HTTP clients: bounded attempts,
/// exponential backoff with a small random jitter.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Delay before retry number `attempt` (1-based):
    /// 1.5^attempt seconds plus 333-666 ms of jitter.
    pub fn delay(&self, attempt: u32) -> Duration {
        let backoff = Duration::from_secs_f64(1.5f64.powi(attempt as i32));
        let jitter = Duration::from_millis(rand::thread_rng().gen_range(333..=666));
        backoff + jitter
    }

    /// Statuses worth another attempt: server errors, request timeout,
    /// and "too many requests".
    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        status.is_server_error()
            || status == StatusCode::REQUEST_TIMEOUT
            || status == StatusCode::TOO_MANY_REQUESTS
    }
}
