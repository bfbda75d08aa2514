//! Bounded retry policy for upstream calls.

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

/// Fixed-delay retry policy: `max_attempts` tries, same delay between each.
///
/// The policy only describes the schedule; the forwarder decides which
/// failures are retryable (timeouts and network errors, never an HTTP
/// response from upstream).
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: usize,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Total attempts allowed, first try included.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Delays to wait between attempts: one fewer than `max_attempts`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        FixedInterval::new(self.delay).take(self.max_attempts.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_count_is_attempts_minus_one() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        let delays: Vec<_> = policy.delays().collect();
        assert_eq!(delays.len(), 2);
        assert!(delays.iter().all(|d| *d == Duration::from_millis(100)));
    }

    #[test]
    fn test_single_attempt_has_no_delays() {
        let policy = RetryPolicy::new(1, Duration::from_secs(1));
        assert_eq!(policy.delays().count(), 0);
    }
}
