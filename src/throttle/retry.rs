//! Recovery delays for failed page fetches

use crate::pagination::PageFailure;
use std::time::Duration;

/// How the loop recovers from page failures
///
/// `max_attempts = None` retries forever. With `Some(n)`, `n` consecutive
/// failures on the same cursor abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Consecutive failures tolerated per cursor
    pub max_attempts: Option<u32>,
    /// Wait after HTTP 429
    pub rate_limit_cooldown: Duration,
    /// Wait after a malformed response
    pub malformed_delay: Duration,
    /// Wait after any other failure
    pub transient_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            rate_limit_cooldown: Duration::from_secs(120),
            malformed_delay: Duration::from_secs(5),
            transient_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Unbounded retries with default delays
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Cap consecutive failures per cursor
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Wait before retrying after `failure`
    pub fn delay_for(&self, failure: &PageFailure) -> Duration {
        match failure {
            PageFailure::RateLimited => self.rate_limit_cooldown,
            PageFailure::MalformedResponse { .. } => self.malformed_delay,
            PageFailure::Transient { .. } => self.transient_delay,
        }
    }

    /// Check whether `failures` consecutive failures exhaust the policy
    pub fn is_exhausted(&self, failures: u32) -> bool {
        self.max_attempts.is_some_and(|max| failures >= max)
    }
}
