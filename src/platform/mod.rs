//! Platform abstraction layer
//!
//! Handles the host-facing edges of the game:
//! - Time: turning variable frame deltas into fixed simulation steps
//! - Input: the single game button

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Raw input events a host can forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Touch, mouse click or space bar
    Tap,
    /// Any other key; ignored
    Other,
}

impl Input {
    /// Whether this event is the game button
    pub fn is_button(self) -> bool {
        matches!(self, Input::Tap)
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    step: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            accumulator: 0.0,
            step,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed a frame delta; returns how many fixed steps to run
    ///
    /// Deltas are clamped and substeps capped to prevent a spiral of death;
    /// time beyond the cap is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.step <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }
}
