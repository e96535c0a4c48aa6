//! Absolute time sources for animation phase.
//!
//! Swing phase is a function of absolute seconds since start, never of
//! accumulated frame deltas.

use std::cell::Cell;
use std::time::Instant;

pub trait Clock {
    /// Monotonic seconds since the clock's epoch.
    fn now_seconds(&self) -> f64;
}

/// Wall clock whose epoch is the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that reports whatever it was last set to.
#[derive(Debug, Default)]
pub struct FixedClock {
    seconds: Cell<f64>,
}

impl FixedClock {
    pub fn new(seconds: f64) -> Self {
        Self { seconds: Cell::new(seconds) }
    }

    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + seconds);
    }
}

impl Clock for FixedClock {
    fn now_seconds(&self) -> f64 {
        self.seconds.get()
    }
}
