//! Execution engine module
//!
//! The audit loop.
//!
//! # Overview
//!
//! The engine drives a [`PageSource`] through a small state machine:
//!
//! ```text
//! Fetching ──ok──▶ Processing ──▶ Throttling ──more──▶ Fetching
//!    │  ▲                              │
//!    └──┘ failure: cooldown, same      └──last──▶ Finalizing
//!         cursor
//! ```
//!
//! One request is in flight at a time and every wait goes through the
//! configured [`Sleeper`], so anti-detection delays serialize all requests.

mod progress;
mod types;

pub use progress::{format_duration, AuditEvent, ProgressSink, TracingProgress};
pub use types::{AuditResult, AuditRun, Progress};

use crate::error::{Error, Result};
use crate::pagination::{Page, PageSource};
use crate::session::Session;
use crate::throttle::{RetryPolicy, Sleeper, ThrottleController, TokioSleeper};
use std::time::Duration;
use tracing::debug;

/// Loop states
#[derive(Debug)]
enum Phase {
    Fetching,
    Processing(Page),
    Throttling,
    Finalizing,
}

/// Audit engine orchestrating pagination, filtering and throttling
pub struct AuditEngine {
    /// Page source
    source: Box<dyn PageSource>,
    /// Delay and rest cadence
    throttle: ThrottleController,
    /// Failure recovery
    retry: RetryPolicy,
    /// Suspension
    sleeper: Box<dyn Sleeper>,
    /// Progress output
    progress: Box<dyn ProgressSink>,
}

impl AuditEngine {
    /// Create an engine with unbounded retries, real sleeps and tracing output
    pub fn new(source: Box<dyn PageSource>, throttle: ThrottleController) -> Self {
        Self {
            source,
            throttle,
            retry: RetryPolicy::default(),
            sleeper: Box::new(TokioSleeper),
            progress: Box::new(TracingProgress),
        }
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the sleeper
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Set the progress sink
    #[must_use]
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Get the throttle controller
    pub fn throttle(&self) -> &ThrottleController {
        &self.throttle
    }

    /// Get the retry policy
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Run the audit to completion
    ///
    /// Failed fetches are retried on the same cursor; the run only fails if
    /// the retry policy has a cap and it is reached.
    pub async fn run(&mut self, session: &Session) -> Result<AuditResult> {
        let mut run = AuditRun::new();
        let mut phase = Phase::Fetching;

        loop {
            phase = match phase {
                Phase::Fetching => {
                    let fetched = self.source.next_page(session, run.cursor()).await;
                    match fetched {
                        Ok(page) => Phase::Processing(page),
                        Err(failure) => {
                            let attempt = run.record_failure();
                            if self.retry.is_exhausted(attempt) {
                                return Err(Error::MaxRetriesExceeded {
                                    max_attempts: attempt,
                                    last: failure,
                                });
                            }

                            let delay = self.retry.delay_for(&failure);
                            self.progress.emit(&AuditEvent::Retrying {
                                failure,
                                attempt,
                                delay,
                            });
                            self.suspend(delay).await;
                            Phase::Fetching
                        }
                    }
                }

                Phase::Processing(page) => {
                    let known_total = run.result().total_following;
                    let count = run.absorb(page);
                    self.throttle.record_processed(count);

                    let total = run.result().total_following;
                    if total != known_total {
                        if let Some(total) = total {
                            self.progress.emit(&AuditEvent::TotalDiscovered(total));
                        }
                    }
                    debug!(
                        records = count,
                        cursor = %run.cursor(),
                        has_next = run.has_next(),
                        "Processed page"
                    );
                    self.progress.emit(&AuditEvent::PageProcessed(run.progress()));
                    Phase::Throttling
                }

                Phase::Throttling => match self.throttle.next_pause(run.has_next()) {
                    Some(pause) => {
                        self.progress.emit(&AuditEvent::Paused(pause));
                        self.suspend(pause.duration).await;
                        Phase::Fetching
                    }
                    None => Phase::Finalizing,
                },

                Phase::Finalizing => {
                    let elapsed = run.elapsed();
                    let result = run.finish();
                    self.progress.emit(&AuditEvent::Finished {
                        processed: result.processed,
                        not_following_back: result.not_following_back(),
                        elapsed,
                    });
                    return Ok(result);
                }
            };
        }
    }

    async fn suspend(&mut self, duration: Duration) {
        self.sleeper.sleep(duration).await;
        self.throttle.record_suspended(duration);
    }
}

impl std::fmt::Debug for AuditEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditEngine")
            .field("throttle", &self.throttle)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
