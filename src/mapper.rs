//! Maps an input rectangle to an output rectangle and stabilizes the result.
//!
//! The mapper converts a shoulder-relative measurement into screen space with
//! a configurable axis-scale alignment policy, then runs the position through
//! an exponential lag stage and an optional statistical stage.

use crate::constants::DEFAULT_MOVE_SCALE;
use crate::filters::{exponential::ExponentialStage, kalman::KalmanStage, SmoothingStage};
use crate::geometry::{Rect, Vector2};
use serde::{Deserialize, Serialize};

/// Rule for reconciling the independent horizontal/vertical scale factors
/// into the final input→output coordinate scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleAlignment {
    /// Unit scale, axis signs preserved
    #[default]
    None,
    /// Uniform scale from the horizontal axis
    Horizontal,
    /// Uniform scale from the vertical axis
    Vertical,
    /// Independent per-axis scale (non-uniform stretch)
    Both,
    /// Uniform scale magnitude from the shorter output axis, signs per axis
    ShorterRange,
    /// Uniform scale magnitude from the longer output axis, signs per axis
    LongerRange,
}

/// Coordinate mapper with chained smoothing stages
pub struct CursorMapper {
    input_rect: Rect,
    output_rect: Rect,
    scale_align: ScaleAlignment,
    move_scale: f64,
    align_scale: Vector2,
    total_scale: Vector2,
    move_offset: Vector2,
    exponential: ExponentialStage,
    statistical: Option<Box<dyn SmoothingStage>>,
}

impl CursorMapper {
    pub fn new(input_rect: Rect, output_rect: Rect, scale_align: ScaleAlignment) -> Self {
        let mut mapper = Self {
            input_rect,
            output_rect,
            scale_align,
            move_scale: DEFAULT_MOVE_SCALE,
            align_scale: Vector2::ONE,
            total_scale: Vector2::ONE,
            move_offset: Vector2::ONE,
            exponential: ExponentialStage::new(0.0),
            statistical: Some(Box::new(KalmanStage::new())),
        };
        mapper.update_mapping();
        mapper
    }

    pub fn input_rect(&self) -> Rect {
        self.input_rect
    }

    pub fn set_input_rect(&mut self, rect: Rect) {
        self.input_rect = rect;
        self.update_mapping();
    }

    pub fn output_rect(&self) -> Rect {
        self.output_rect
    }

    pub fn set_output_rect(&mut self, rect: Rect) {
        self.output_rect = rect;
        self.update_mapping();
    }

    pub fn set_rects(&mut self, input_rect: Rect, output_rect: Rect) {
        self.input_rect = input_rect;
        self.output_rect = output_rect;
        self.update_mapping();
    }

    pub fn scale_alignment(&self) -> ScaleAlignment {
        self.scale_align
    }

    pub fn set_scale_alignment(&mut self, scale_align: ScaleAlignment) {
        self.scale_align = scale_align;
        self.update_mapping();
    }

    pub fn align_scale(&self) -> Vector2 {
        self.align_scale
    }

    /// Sensitivity gain multiplied onto the alignment scale
    pub fn move_scale(&self) -> f64 {
        self.move_scale
    }

    pub fn set_move_scale(&mut self, move_scale: f64) {
        self.move_scale = move_scale;
        self.total_scale = self.align_scale * move_scale;
    }

    pub fn smoothing(&self) -> f64 {
        self.exponential.smoothing()
    }

    /// Exponential smoothing factor, clamped to [0, 1]
    pub fn set_smoothing(&mut self, smoothing: f64) {
        self.exponential.set_smoothing(smoothing);
    }

    /// Replace or disable (`None`) the statistical stage
    pub fn set_statistical_stage(&mut self, stage: Option<Box<dyn SmoothingStage>>) {
        self.statistical = stage;
    }

    pub fn statistical_stage_enabled(&self) -> bool {
        self.statistical.is_some()
    }

    /// Raw mapped position, no smoothing.
    ///
    /// Note: the output rect's top-left is added on top of the center-based
    /// term, so non-zero-origin output rects are shifted by their own origin.
    /// Kept as the reference mapping formula; see DESIGN.md.
    pub fn output_position(&self, input_position: Vector2) -> Vector2 {
        self.output_rect.center()
            + (input_position - self.input_rect.center()) * self.total_scale
            + self.move_offset
    }

    /// Mapped position after the smoothing chain. The final stage output is
    /// rebased into the exponential stage so next frame smooths from the
    /// position the cursor actually took.
    ///
    /// `extra_scale` feeds the exponential step, e.g. an elapsed-time ratio
    /// to make smoothing time-step-aware.
    pub fn smoothed_output_position(&mut self, input_position: Vector2, extra_scale: f64) -> Vector2 {
        let target = self.output_position(input_position);
        let mut position = self.exponential.apply(target, extra_scale);
        if let Some(stage) = self.statistical.as_mut() {
            position = stage.apply(position, extra_scale);
            self.exponential.rebase(position);
        }
        position
    }

    /// Reset all smoothing state (rects and scales are untouched)
    pub fn reset_smoothing(&mut self) {
        self.exponential.reset();
        if let Some(stage) = self.statistical.as_mut() {
            stage.reset();
        }
    }

    fn update_mapping(&mut self) {
        let scale_x = self.output_rect.delta_x() / self.input_rect.delta_x();
        let scale_y = self.output_rect.delta_y() / self.input_rect.delta_y();

        self.align_scale = match self.scale_align {
            ScaleAlignment::Both => Vector2::new(scale_x, scale_y),
            ScaleAlignment::Horizontal => Vector2::new(scale_x, scale_x),
            ScaleAlignment::Vertical => Vector2::new(scale_y, scale_y),
            ScaleAlignment::LongerRange => {
                let longer = if self.output_rect.width() > self.output_rect.height() {
                    scale_x
                } else {
                    scale_y
                }
                .abs();
                Vector2::new(longer * scale_x.signum(), longer * scale_y.signum())
            }
            ScaleAlignment::ShorterRange => {
                let shorter = if self.output_rect.width() < self.output_rect.height() {
                    scale_x
                } else {
                    scale_y
                }
                .abs();
                Vector2::new(shorter * scale_x.signum(), shorter * scale_y.signum())
            }
            ScaleAlignment::None => Vector2::new(scale_x.signum(), scale_y.signum()),
        };

        self.move_offset = Vector2::new(self.output_rect.left, self.output_rect.top);
        self.total_scale = self.align_scale * self.move_scale;
    }
}
