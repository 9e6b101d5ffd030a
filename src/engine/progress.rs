//! Progress reporting
//!
//! Presentation only; nothing here feeds back into the loop.

use super::types::Progress;
use crate::pagination::PageFailure;
use crate::throttle::{Pause, PauseKind};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something worth telling the operator about
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEvent {
    /// Total following count learned from the first page
    TotalDiscovered(u64),
    /// A page was processed
    PageProcessed(Progress),
    /// The loop is about to suspend between pages
    Paused(Pause),
    /// A fetch failed and will be retried after `delay`
    Retrying {
        /// Why the fetch failed
        failure: PageFailure,
        /// Consecutive failures on this cursor
        attempt: u32,
        /// Wait before the retry
        delay: Duration,
    },
    /// The last page was processed
    Finished {
        /// Profiles processed
        processed: u64,
        /// Non-reciprocating accounts found
        not_following_back: usize,
        /// Total run time
        elapsed: Duration,
    },
}

/// Receives progress events from the audit loop
pub trait ProgressSink: Send + Sync {
    /// Handle one event
    fn emit(&self, event: &AuditEvent);
}

/// Logs progress through tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn emit(&self, event: &AuditEvent) {
        match event {
            AuditEvent::TotalDiscovered(total) => info!("Total following: {total}"),
            AuditEvent::PageProcessed(p) => {
                let eta = p.eta.map_or_else(|| "-".to_string(), format_duration);
                info!(
                    "Progress: {}/{} ({:.0}%) | Not following back: {} | Elapsed: {} | ETA: {}",
                    p.processed,
                    p.total,
                    p.percent,
                    p.not_following_back,
                    format_duration(p.elapsed),
                    eta
                );
            }
            AuditEvent::Paused(pause) => match pause.kind {
                PauseKind::ExtendedRest => {
                    info!("Long rest: {}s...", pause.duration.as_secs_f64().round());
                }
                PauseKind::Delay => {
                    debug!("Waiting {}ms before next page", pause.duration.as_millis());
                }
            },
            AuditEvent::Retrying {
                failure,
                attempt,
                delay,
            } => match failure {
                PageFailure::RateLimited => {
                    warn!("Rate limit! Waiting {}...", format_duration(*delay));
                }
                other => warn!(
                    "{other}. Retrying in {} (attempt {attempt})",
                    format_duration(*delay)
                ),
            },
            AuditEvent::Finished {
                processed,
                not_following_back,
                elapsed,
            } => info!(
                "Done. Processed: {processed} | Not following back: {not_following_back} | Total time: {}",
                format_duration(*elapsed)
            ),
        }
    }
}

/// Format a duration as `"{minutes}m {seconds}s"`
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    format!("{}m {}s", seconds / 60, seconds % 60)
}
