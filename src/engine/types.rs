//! Engine types
//!
//! Run state owned by the audit loop and the result it finalizes.

use crate::pagination::{Page, PageCursor, RelationshipRecord};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

/// Accumulated outcome of an audit run
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult {
    /// Non-reciprocating accounts, in the order they were seen
    pub users: Vec<RelationshipRecord>,
    /// Total following count, cached from the first page reporting a
    /// non-zero count
    pub total_following: Option<u64>,
    /// Profiles processed
    pub processed: u64,
    /// Pages successfully parsed
    pub pages_fetched: u64,
    /// Failed fetches that were retried
    pub retries: u64,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,
    /// Set when the endpoint claimed more pages but gave no cursor
    pub truncated: bool,
}

impl AuditResult {
    /// Create an empty result
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            users: Vec::new(),
            total_following: None,
            processed: 0,
            pages_fetched: 0,
            retries: 0,
            started_at,
            finished_at: None,
            truncated: false,
        }
    }

    /// Number of accounts not following back
    pub fn not_following_back(&self) -> usize {
        self.users.len()
    }

    /// Check if the run reached the last page
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

/// Progress after a processed page
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Profiles processed so far
    pub processed: u64,
    /// Cached total following count
    pub total: u64,
    /// Non-reciprocating accounts so far
    pub not_following_back: usize,
    /// Pages processed so far
    pub pages: u64,
    /// `processed / total` as a percentage, unclamped
    pub percent: f64,
    /// Time since the run started
    pub elapsed: Duration,
    /// Estimated time remaining
    pub eta: Option<Duration>,
}

/// Mutable state threaded through the audit loop
#[derive(Debug)]
pub struct AuditRun {
    cursor: PageCursor,
    has_next: bool,
    consecutive_failures: u32,
    started: Instant,
    result: AuditResult,
}

impl AuditRun {
    /// Start a run at the first page
    pub fn new() -> Self {
        Self {
            cursor: PageCursor::Start,
            has_next: true,
            consecutive_failures: 0,
            started: Instant::now(),
            result: AuditResult::new(Utc::now()),
        }
    }

    /// Cursor for the next fetch
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Whether another page remains
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Result accumulated so far
    pub fn result(&self) -> &AuditResult {
        &self.result
    }

    /// Count a failed fetch, returning the consecutive failure count
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.result.retries += 1;
        self.consecutive_failures
    }

    /// Fold a successful page into the run, returning the records processed
    ///
    /// Only non-reciprocating records are kept. The total is taken from the
    /// first page that reports one and replaced only while it is zero. A
    /// page that claims more pages but carries no cursor ends the run as
    /// truncated, since advancing would mean refetching the current page.
    pub fn absorb(&mut self, page: Page) -> u64 {
        self.consecutive_failures = 0;

        if let (None | Some(0), Some(count)) = (self.result.total_following, page.total_count) {
            self.result.total_following = Some(count);
        }

        let count = page.records.len() as u64;
        self.result.processed += count;
        self.result.pages_fetched += 1;
        self.result
            .users
            .extend(page.records.into_iter().filter(|r| !r.is_reciprocated()));

        match page.next_cursor {
            Some(next) if page.has_next => {
                self.cursor = next;
                self.has_next = true;
            }
            None if page.has_next => {
                warn!(
                    cursor = %self.cursor,
                    processed = self.result.processed,
                    "More pages reported without a cursor; report will be incomplete"
                );
                self.result.truncated = true;
                self.has_next = false;
            }
            _ => self.has_next = false,
        }

        count
    }

    /// Progress snapshot; ETA is elapsed / processed × remaining
    pub fn progress(&self) -> Progress {
        let processed = self.result.processed;
        let total = self.result.total_following.unwrap_or(0);
        let elapsed = self.started.elapsed();

        let percent = if total == 0 {
            100.0
        } else {
            processed as f64 / total as f64 * 100.0
        };
        let eta = (processed > 0).then(|| {
            let remaining = total.saturating_sub(processed);
            elapsed.mul_f64(remaining as f64 / processed as f64)
        });

        Progress {
            processed,
            total,
            not_following_back: self.result.not_following_back(),
            pages: self.result.pages_fetched,
            percent,
            elapsed,
            eta,
        }
    }

    /// Time since the run started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stamp the end time and hand over the result
    pub fn finish(mut self) -> AuditResult {
        self.result.finished_at = Some(Utc::now());
        self.result
    }
}

impl Default for AuditRun {
    fn default() -> Self {
        Self::new()
    }
}
