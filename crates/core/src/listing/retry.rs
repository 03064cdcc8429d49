//! Exponential backoff policy for listing-service requests.

use std::time::Duration;

use crate::config::RetryConfig;

/// Backoff schedule applied to retryable listing errors.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    backoff_factor: f64,
    max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            backoff_factor: config.backoff_factor.max(1.0),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Total attempts allowed, the first one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the attempt following `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.powi(attempt.saturating_sub(1) as i32);
        let delay = self.initial_delay.mul_f64(factor);
        delay.min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32, initial_ms: u64, factor: f64, max_ms: u64) -> RetryPolicy {
        RetryPolicy::new(&RetryConfig {
            max_attempts,
            initial_delay_ms: initial_ms,
            backoff_factor: factor,
            max_delay_ms: max_ms,
        })
    }

    #[test]
    fn test_exponential_progression() {
        let policy = policy(5, 500, 2.0, 60_000);
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_delay_capped() {
        let policy = policy(10, 500, 10.0, 2_000);
        assert_eq!(policy.delay_for(5), Duration::from_millis(2000));
    }

    #[test]
    fn test_minimum_one_attempt() {
        let policy = policy(0, 100, 2.0, 1_000);
        assert_eq!(policy.max_attempts(), 1);
    }
}
