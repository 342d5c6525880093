//! Time-accumulator movement
//!
//! Converts a continuous "cells per second" speed into discrete grid steps,
//! decoupling simulation rate from frame rate. Callers clamp `dt` before
//! advancing; with a clamped delta a single call yields at most
//! `floor(dt / interval) + 1` steps.

use serde::{Deserialize, Serialize};

/// Running time balance that emits one step per elapsed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepTimer {
    interval: f32,
    accumulator: f32,
}

impl StepTimer {
    /// Timer that emits a step every `interval` seconds.
    pub fn new(interval: f32) -> Self {
        debug_assert!(interval > 0.0);
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Timer for an entity moving at `cells_per_second`.
    pub fn from_rate(cells_per_second: f32) -> Self {
        Self::new(1.0 / cells_per_second)
    }

    /// Accumulate `dt` and drain the number of steps now due.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            steps += 1;
        }
        steps
    }

    /// Drop any banked time (used on respawn).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}
