//! Suspension between requests

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Suspends the audit loop
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration` without blocking the runtime
    async fn sleep(&self, duration: Duration);
}

/// Real suspension on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records requested durations and returns immediately
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration requested so far, in order
    pub fn slept(&self) -> Vec<Duration> {
        self.slept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sum of all requested durations
    pub fn total(&self) -> Duration {
        self.slept().iter().sum()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}
