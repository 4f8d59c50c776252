//! Animation clock.
//!
//! `FixedStep` advances by a constant amount per tick regardless of real
//! elapsed time, so playback speed follows the frame rate. `Elapsed` uses
//! the host's frame delta instead and is what hosts with variable frame
//! times should pick.

use log::debug;
use serde::{Deserialize, Serialize};

/// Per-tick increment of the fixed-step clock.
pub const DEFAULT_FIXED_STEP: f32 = 0.01;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClockMode {
    /// Advance by `step` per tick, ignoring the elapsed time.
    FixedStep { step: f32 },
    /// Advance by `elapsed * speed` per tick.
    Elapsed { speed: f32 },
}

impl Default for ClockMode {
    fn default() -> Self {
        ClockMode::FixedStep {
            step: DEFAULT_FIXED_STEP,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Clock {
    mode: ClockMode,
    time: f32,
}

impl Clock {
    pub fn new(mode: ClockMode) -> Self {
        Self { mode, time: 0.0 }
    }

    /// Advance one tick and return the new time.
    ///
    /// In `Elapsed` mode a negative or non-finite `elapsed` is ignored.
    pub fn tick(&mut self, elapsed: f32) -> f32 {
        match self.mode {
            ClockMode::FixedStep { step } => self.time += step,
            ClockMode::Elapsed { speed } => {
                if elapsed.is_finite() && elapsed >= 0.0 {
                    self.time += elapsed * speed;
                } else {
                    debug!("clock: ignoring elapsed={elapsed}");
                }
            }
        }
        self.time
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ClockMode) {
        self.mode = mode;
    }

    pub fn seek(&mut self, time: f32) {
        if time.is_finite() {
            self.time = time;
        }
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}
