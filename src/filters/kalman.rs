//! Per-axis recursive estimator for damping residual sensor noise.
//!
//! Each screen axis runs an independent single-variable constant-position
//! filter with the usual prediction / measurement-update cycle. Applied after
//! the exponential stage, its output becomes the final cursor position.

use super::SmoothingStage;
use crate::constants::{DEFAULT_KALMAN_MEASUREMENT_NOISE, DEFAULT_KALMAN_PROCESS_NOISE};
use crate::geometry::Vector2;

/// Single-variable recursive estimator
#[derive(Debug, Clone)]
struct AxisFilter {
    // Estimated value and its variance
    state: f64,
    covariance: f64,
    // Process and measurement noise
    q: f64,
    r: f64,
    initialized: bool,
}

impl AxisFilter {
    fn new(q: f64, r: f64) -> Self {
        Self {
            state: 0.0,
            covariance: 1.0,
            q,
            r,
            initialized: false,
        }
    }

    fn update(&mut self, measurement: f64) -> f64 {
        if !self.initialized {
            self.state = measurement;
            self.initialized = true;
            return self.state;
        }

        // Predict: constant-position model, uncertainty grows by q
        self.covariance += self.q;

        // Update
        let gain = self.covariance / (self.covariance + self.r);
        self.state += gain * (measurement - self.state);
        self.covariance *= 1.0 - gain;

        self.state
    }

    fn reset(&mut self) {
        self.state = 0.0;
        self.covariance = 1.0;
        self.initialized = false;
    }
}

/// Statistical smoothing stage: one [`AxisFilter`] per screen axis
pub struct KalmanStage {
    x_filter: AxisFilter,
    y_filter: AxisFilter,
}

impl KalmanStage {
    pub fn new() -> Self {
        Self::with_noise(DEFAULT_KALMAN_PROCESS_NOISE, DEFAULT_KALMAN_MEASUREMENT_NOISE)
    }

    pub fn with_noise(process_noise: f64, measurement_noise: f64) -> Self {
        Self {
            x_filter: AxisFilter::new(process_noise, measurement_noise),
            y_filter: AxisFilter::new(process_noise, measurement_noise),
        }
    }
}

impl Default for KalmanStage {
    fn default() -> Self {
        Self::new()
    }
}

impl SmoothingStage for KalmanStage {
    fn apply(&mut self, target: Vector2, _extra_scale: f64) -> Vector2 {
        Vector2::new(self.x_filter.update(target.x), self.y_filter.update(target.y))
    }

    fn rebase(&mut self, _position: Vector2) {
        // Terminal stage: its own output is the final position already
    }

    fn reset(&mut self) {
        self.x_filter.reset();
        self.y_filter.reset();
    }

    fn name(&self) -> &str {
        "KalmanStage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_measurement_initializes() {
        let mut stage = KalmanStage::new();
        let out = stage.apply(Vector2::new(100.0, 200.0), 1.0);
        assert_eq!(out, Vector2::new(100.0, 200.0));
    }

    #[test]
    fn test_subsequent_measurements_are_damped() {
        let mut stage = KalmanStage::new();
        stage.apply(Vector2::new(100.0, 200.0), 1.0);
        let out = stage.apply(Vector2::new(110.0, 210.0), 1.0);
        assert!(out.x > 100.0 && out.x < 110.0);
        assert!(out.y > 200.0 && out.y < 210.0);
    }

    #[test]
    fn test_converges_to_steady_measurement() {
        let mut stage = KalmanStage::new();
        let mut out = Vector2::ZERO;
        for _ in 0..200 {
            out = stage.apply(Vector2::new(50.0, -30.0), 1.0);
        }
        assert!((out.x - 50.0).abs() < 0.5);
        assert!((out.y - -30.0).abs() < 0.5);
    }

    #[test]
    fn test_axes_are_independent() {
        let mut stage = KalmanStage::new();
        stage.apply(Vector2::new(0.0, 100.0), 1.0);
        let out = stage.apply(Vector2::new(0.0, 120.0), 1.0);
        assert_eq!(out.x, 0.0);
        assert!(out.y > 100.0);
    }

    #[test]
    fn test_reset_forgets_state() {
        let mut stage = KalmanStage::new();
        stage.apply(Vector2::new(100.0, 100.0), 1.0);
        stage.reset();
        let out = stage.apply(Vector2::new(5.0, 5.0), 1.0);
        assert_eq!(out, Vector2::new(5.0, 5.0));
    }
}
