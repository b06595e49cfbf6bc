//! Exponential lag smoothing.
//!
//! The cursor is not moved to the exact target but somewhere in between:
//! `new = current + (target - current) * move_amount`, where `move_amount`
//! is how much of the remaining distance is applied each step (e.g. 0.5
//! moves halfway to the destination).

use super::SmoothingStage;
use crate::constants::{SMOOTHING_MAX, SMOOTHING_MIN};
use crate::geometry::Vector2;

/// Exponential smoothing stage holding the running cursor position
pub struct ExponentialStage {
    position: Vector2,
    move_amount: f64,
}

impl ExponentialStage {
    /// `smoothing` is clamped to [0, 1]; `move_amount = 1 - smoothing`
    pub fn new(smoothing: f64) -> Self {
        let mut stage = Self {
            position: Vector2::ZERO,
            move_amount: 1.0,
        };
        stage.set_smoothing(smoothing);
        stage
    }

    pub fn smoothing(&self) -> f64 {
        1.0 - self.move_amount
    }

    pub fn set_smoothing(&mut self, smoothing: f64) {
        self.move_amount = 1.0 - smoothing.clamp(SMOOTHING_MIN, SMOOTHING_MAX);
    }
}

impl SmoothingStage for ExponentialStage {
    fn apply(&mut self, target: Vector2, extra_scale: f64) -> Vector2 {
        self.position += (target - self.position) * self.move_amount * extra_scale;
        self.position
    }

    fn rebase(&mut self, position: Vector2) {
        self.position = position;
    }

    fn reset(&mut self) {
        self.position = Vector2::ZERO;
    }

    fn name(&self) -> &str {
        "ExponentialStage"
    }
}
