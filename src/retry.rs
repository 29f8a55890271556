//! Backoff schedule for failed scoring attempts.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Capped exponential backoff with uniform jitter.
///
/// The delay after a failure on attempt `n` (zero-based) is
/// `base_delay_ms * 2^min(n, cap_exponent)` plus a random jitter in
/// `[0, jitter_ms)`. The floor is therefore always `base_delay_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts per work item before the row is marked terminally failed.
    pub max_attempts: u32,
    /// Base delay in milliseconds, doubled per attempt.
    pub base_delay_ms: u64,
    /// Attempt number past which the exponential stops growing.
    pub cap_exponent: u32,
    /// Exclusive upper bound of the random jitter, in milliseconds.
    pub jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 600,
            cap_exponent: 5,
            jitter_ms: 250,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before re-attempting after a failure on `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        // Double min keeps a misconfigured cap from overflowing the shift.
        let exp = attempt.min(self.cap_exponent).min(63);
        let backoff = self.base_delay_ms.saturating_mul(1u64 << exp);
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..self.jitter_ms)
        };
        Duration::from_millis(backoff.saturating_add(jitter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> RetryPolicy {
        RetryPolicy {
            jitter_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn default_constants() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_ms, 600);
        assert_eq!(policy.cap_exponent, 5);
        assert_eq!(policy.jitter_ms, 250);
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = no_jitter();
        assert_eq!(policy.delay_for(0), Duration::from_millis(600));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2400));
        assert_eq!(policy.delay_for(5), Duration::from_millis(19200));
    }

    #[test]
    fn backoff_is_capped() {
        let policy = no_jitter();
        assert_eq!(policy.delay_for(5), policy.delay_for(6));
        assert_eq!(policy.delay_for(5), policy.delay_for(100));
    }

    #[test]
    fn backoff_is_monotonic_up_to_cap() {
        let policy = no_jitter();
        for attempt in 0..policy.cap_exponent {
            assert!(policy.delay_for(attempt) <= policy.delay_for(attempt + 1));
        }
    }

    #[test]
    fn jitter_stays_within_bound() {
        let policy = RetryPolicy::default();
        let floor = Duration::from_millis(600);
        let ceiling = Duration::from_millis(600 + 250);
        for _ in 0..200 {
            let delay = policy.delay_for(0);
            assert!(delay >= floor, "delay {delay:?} under the base floor");
            assert!(delay < ceiling, "delay {delay:?} exceeds base + jitter");
        }
    }
}
