//! Randomized human-like delays

use std::f64::consts::PI;
use std::time::Duration;

/// Source of uniform random values in `[0, 1)`
pub trait RandomSource: Send {
    /// Next uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

/// Production randomness backed by fastrand
#[derive(Debug)]
pub struct FastRandSource {
    rng: fastrand::Rng,
}

impl FastRandSource {
    /// Create a source seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Create a reproducible source
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for FastRandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FastRandSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.f64()
    }
}

/// Deterministic source cycling through fixed values
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    next: usize,
}

impl SequenceSource {
    /// Create a source from fixed values; an empty list yields 0.5
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Draw a delay in `[min, max]` concentrated around the midpoint
///
/// Box–Muller turns two uniforms into a standard normal sample; ±3σ is
/// mapped onto `[0, 1]`, clipped, then interpolated into the range and
/// floored to whole milliseconds.
pub fn human_delay(min: Duration, max: Duration, rng: &mut dyn RandomSource) -> Duration {
    if max <= min {
        return min;
    }

    let u1 = rng.next_f64().max(f64::MIN_POSITIVE);
    let u2 = rng.next_f64();
    let gaussian = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    let normalized = ((gaussian + 3.0) / 6.0).clamp(0.0, 1.0);

    let min_ms = min.as_millis() as f64;
    let span_ms = (max - min).as_millis() as f64;
    Duration::from_millis((min_ms + normalized * span_ms).floor() as u64)
}
