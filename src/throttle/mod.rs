//! Throttle module
//!
//! Decides how long the audit loop suspends between requests.
//!
//! # Overview
//!
//! - [`ThrottleController`] - per-page bell-shaped delays and periodic
//!   extended rests, with the counters in [`ThrottleState`]
//! - [`RetryPolicy`] - cooldowns for failed fetches and the optional
//!   attempt cap
//! - [`RandomSource`] - pluggable randomness for delay draws
//! - [`Sleeper`] - pluggable suspension

mod controller;
mod delay;
mod retry;
mod sleeper;

pub use controller::{Pause, PauseKind, ThrottleConfig, ThrottleController, ThrottleState};
pub use delay::{human_delay, FastRandSource, RandomSource, SequenceSource};
pub use retry::RetryPolicy;
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
