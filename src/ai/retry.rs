//! Attempt budgets and backoff schedules for provider requests.

use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

/// How many times a provider request may be attempted and how long to
/// sleep between attempts.
///
/// Sleeps start at twice the initial delay and double after each
/// failed attempt. The default of five attempts with a one second
/// initial delay waits 2s, 4s, 8s, then 16s between attempts. No
/// sleep follows the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
        )
    }
}

impl RetryPolicy {
    /// Creates a policy. A `max_attempts` of zero is clamped to one,
    /// since every request gets at least one attempt.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// A policy that never retries.
    pub fn single_attempt() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The delays slept between attempts, one fewer than the number
    /// of attempts.
    pub fn backoff(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(2)
            .factor(self.initial_delay.as_millis() as u64)
            .take(self.max_attempts as usize - 1)
    }
}
