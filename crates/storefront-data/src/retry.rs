//! Retry policies for API calls.

use crate::FetchError;
use std::time::Duration;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                std::cmp::min(base.saturating_mul(multiplier), *max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(50),
            max: Duration::from_millis(500),
        }
    }
}

/// Retry policy configuration.
///
/// Only transient failures (transport errors, timeouts, 5xx) are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try.
    pub max_attempts: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
    /// Whether mutating requests may be retried.
    pub retry_mutations: bool,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::default(),
            retry_mutations: false,
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: BackoffStrategy::None,
            retry_mutations: false,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Allow retrying POST/PUT/DELETE.
    pub fn with_mutations(mut self, enabled: bool) -> Self {
        self.retry_mutations = enabled;
        self
    }

    /// Decide whether `attempt` (0-indexed) may be followed by another try.
    pub fn should_retry(&self, error: &FetchError, mutating: bool, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        if mutating && !self.retry_mutations {
            return false;
        }
        error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_caps() {
        let backoff = BackoffStrategy::default();
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(50));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(10), Duration::from_millis(500));
    }

    #[test]
    fn test_fixed_backoff() {
        let backoff = BackoffStrategy::Fixed(Duration::from_millis(20));
        assert_eq!(backoff.delay_for_attempt(5), Duration::from_millis(20));
        assert_eq!(BackoffStrategy::None.delay_for_attempt(3), Duration::ZERO);
    }

    #[test]
    fn test_default_never_retries() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(&FetchError::Timeout, false, 0));
    }

    #[test]
    fn test_only_transient_errors_retry() {
        let policy = RetryPolicy::new(2);
        let server = FetchError::Http { status: 502, message: String::new() };
        let missing = FetchError::Http { status: 404, message: String::new() };

        assert!(policy.should_retry(&server, false, 0));
        assert!(policy.should_retry(&server, false, 1));
        assert!(!policy.should_retry(&server, false, 2));
        assert!(!policy.should_retry(&missing, false, 0));
    }

    #[test]
    fn test_mutations_need_opt_in() {
        let err = FetchError::Transport("reset".into());
        assert!(!RetryPolicy::new(3).should_retry(&err, true, 0));
        assert!(RetryPolicy::new(3).with_mutations(true).should_retry(&err, true, 0));
    }
}
