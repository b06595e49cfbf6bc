//! Smoothing stages for stabilizing the mapped cursor position.
//!
//! The mapper chains stages in sequence; each one is independently swappable
//! or disableable. Chaining compounds lag, which is an intentional trade for
//! jitter reduction.

/// Exponential lag stage for responsive smoothing
pub mod exponential;

/// Per-axis recursive estimator stage for statistical noise damping
pub mod kalman;

use crate::geometry::Vector2;
use crate::Result;

/// One smoothing stage in the cursor pipeline
pub trait SmoothingStage: Send {
    /// Advance the stage toward `target` and return the stage output.
    /// `extra_scale` lets callers make the step time-aware (e.g. multiply by
    /// an elapsed-time ratio); stages without a step size ignore it.
    fn apply(&mut self, target: Vector2, extra_scale: f64) -> Vector2;

    /// Overwrite the stage's notion of the current position without filtering.
    /// Called after a later stage has produced the final output, so the next
    /// frame smooths from what the cursor actually shows.
    fn rebase(&mut self, position: Vector2);

    /// Reset internal state
    fn reset(&mut self);

    /// Stage name
    fn name(&self) -> &str;
}

/// Pass-through stage
pub struct NoSmoothing;

impl SmoothingStage for NoSmoothing {
    fn apply(&mut self, target: Vector2, _extra_scale: f64) -> Vector2 {
        target
    }

    fn rebase(&mut self, _position: Vector2) {}

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoSmoothing"
    }
}

/// Create a smoothing stage by type name
pub fn create_stage(stage_type: &str) -> Result<Box<dyn SmoothingStage>> {
    match stage_type.to_lowercase().as_str() {
        "none" | "nosmoothing" => Ok(Box::new(NoSmoothing)),
        "exponential" => Ok(Box::new(exponential::ExponentialStage::new(
            crate::constants::DEFAULT_SMOOTHING,
        ))),
        "kalman" => Ok(Box::new(kalman::KalmanStage::new())),
        _ => Err(crate::Error::FilterError(format!(
            "Unknown smoothing stage type: {stage_type}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_smoothing_passes_through() {
        let mut stage = NoSmoothing;
        let out = stage.apply(Vector2::new(10.0, 20.0), 1.0);
        assert_eq!(out, Vector2::new(10.0, 20.0));
    }

    #[test]
    fn test_create_stage() {
        assert!(create_stage("none").is_ok());
        assert!(create_stage("exponential").is_ok());
        assert!(create_stage("kalman").is_ok());
        assert!(create_stage("unknown").is_err());
    }
}
