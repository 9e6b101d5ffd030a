//! Per-page throttling and rest cadence

use super::delay::{human_delay, FastRandSource, RandomSource};
use std::fmt;
use std::time::Duration;

/// Throttle timing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Lower bound of the per-page delay
    pub min_delay: Duration,
    /// Upper bound of the per-page delay
    pub max_delay: Duration,
    /// Profiles processed between extended rests
    pub profiles_before_long_rest: u64,
    /// Lower bound of an extended rest
    pub long_rest_min: Duration,
    /// Upper bound of an extended rest
    pub long_rest_max: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(2_000),
            max_delay: Duration::from_millis(6_000),
            profiles_before_long_rest: 45,
            long_rest_min: Duration::from_millis(30_000),
            long_rest_max: Duration::from_millis(60_000),
        }
    }
}

/// Kind of suspension issued at a page boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseKind {
    /// Ordinary per-page delay
    Delay,
    /// Periodic long break
    ExtendedRest,
}

/// A suspension decided by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pause {
    /// Which branch produced it
    pub kind: PauseKind,
    /// How long to suspend
    pub duration: Duration,
}

impl Pause {
    /// Check if this is an extended rest
    pub fn is_extended_rest(&self) -> bool {
        self.kind == PauseKind::ExtendedRest
    }
}

/// Counters owned by the controller for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrottleState {
    /// Profiles processed since the last extended rest
    pub since_last_rest: u64,
    /// Profiles processed in the run
    pub total_processed: u64,
    /// Extended rests taken
    pub extended_rests: u64,
    /// Time spent suspended, including recovery waits
    pub suspended: Duration,
}

/// Decides the pause before each subsequent page request
pub struct ThrottleController {
    config: ThrottleConfig,
    rng: Box<dyn RandomSource>,
    state: ThrottleState,
}

impl ThrottleController {
    /// Create a controller with OS-seeded randomness
    pub fn new(config: ThrottleConfig) -> Self {
        Self::with_random(config, Box::new(FastRandSource::new()))
    }

    /// Create a controller with a specific random source
    pub fn with_random(config: ThrottleConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            rng,
            state: ThrottleState::default(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Get the counters
    pub fn state(&self) -> &ThrottleState {
        &self.state
    }

    /// Count profiles processed from a page
    pub fn record_processed(&mut self, count: u64) {
        self.state.since_last_rest += count;
        self.state.total_processed += count;
    }

    /// Add time spent suspended
    pub fn record_suspended(&mut self, duration: Duration) {
        self.state.suspended += duration;
    }

    /// Pause before the next page, or `None` when no page remains
    ///
    /// An extended rest replaces the ordinary delay at the boundary where
    /// the cadence threshold is reached, and resets the cadence counter.
    pub fn next_pause(&mut self, has_more: bool) -> Option<Pause> {
        if !has_more {
            return None;
        }

        if self.state.since_last_rest >= self.config.profiles_before_long_rest {
            let duration = human_delay(
                self.config.long_rest_min,
                self.config.long_rest_max,
                self.rng.as_mut(),
            );
            self.state.since_last_rest = 0;
            self.state.extended_rests += 1;
            return Some(Pause {
                kind: PauseKind::ExtendedRest,
                duration,
            });
        }

        let duration = human_delay(self.config.min_delay, self.config.max_delay, self.rng.as_mut());
        Some(Pause {
            kind: PauseKind::Delay,
            duration,
        })
    }
}

impl fmt::Debug for ThrottleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrottleController")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
