//! Ambient retry wrapper for persistence calls.
//!
//! Fixed attempt count, exponential backoff from a fixed base delay. Only
//! storage errors are retried; validation failures go straight back to the
//! caller. The calculator itself holds no retryable state.

use std::thread::sleep;
use std::time::Duration;

use log::warn;

use crate::errors::Result;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Policy with no sleeping between attempts, for tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }
}

/// Delay before retrying `attempt` (zero-based): base × 2^attempt.
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    policy.base_delay * 2u32.saturating_pow(attempt)
}

pub fn with_retry<T, F>(component: &str, policy: RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut attempt = 0;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < policy.max_attempts => {
                let delay = backoff_delay(&policy, attempt);
                warn!(
                    "[{}] attempt {} failed: {}; retrying in {:?}",
                    component,
                    attempt + 1,
                    err,
                    delay
                );
                sleep(delay);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
