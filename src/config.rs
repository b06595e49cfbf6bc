//! Configuration management for the gesture mouse control application.
//!
//! All tunables live in one explicit struct handed to the pipeline at
//! startup; nothing is process-global.

use crate::constants::{
    DEADZONE_RATIO_MAX, DEADZONE_RATIO_MIN, DEFAULT_DEADZONE_RATIO, DEFAULT_FPS,
    DEFAULT_HAND_LIFT_Y_FOR_CLICK, DEFAULT_HOVER_DURATION, DEFAULT_HOVER_RANGE,
    DEFAULT_MOVE_SCALE, DEFAULT_SMOOTHING,
};
use crate::cursor::ControlMode;
use crate::mapper::ScaleAlignment;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Coordinate mapping and smoothing
    pub mapper: MapperConfig,

    /// Gesture recognition tunables
    pub gesture: GestureConfig,

    /// Hover-to-click tunables
    pub hover: HoverConfig,

    /// Active interaction mode
    pub mode: ControlMode,

    /// Master enable flag
    pub enabled: bool,

    /// Replay pacing in frames per second
    pub fps: f64,
}

/// Coordinate mapping and smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Sensitivity gain (unitless multiplier on the alignment scale)
    pub move_scale: f64,

    /// Exponential smoothing factor (0.0-1.0)
    pub smoothing: f64,

    /// Axis-scale alignment policy
    pub scale_alignment: ScaleAlignment,

    /// Run the statistical stage after exponential smoothing
    pub statistical_filter: bool,
}

/// Gesture recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Forearm-length multiplier for the activation deadzone
    pub deadzone_ratio: f64,

    /// Wrist lift that fires a one-shot click in lift-clicking mode (meters)
    pub hand_lift_y_for_click: f64,
}

/// Hover-to-click configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverConfig {
    /// Movement beyond this distance breaks a hover (pixels)
    pub range: f64,

    /// Dwell time before the click fires (seconds)
    pub duration: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mapper: MapperConfig::default(),
            gesture: GestureConfig::default(),
            hover: HoverConfig::default(),
            mode: ControlMode::Disabled,
            enabled: true,
            fps: DEFAULT_FPS,
        }
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            move_scale: DEFAULT_MOVE_SCALE,
            smoothing: DEFAULT_SMOOTHING,
            scale_alignment: ScaleAlignment::LongerRange,
            statistical_filter: true,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            deadzone_ratio: DEFAULT_DEADZONE_RATIO,
            hand_lift_y_for_click: DEFAULT_HAND_LIFT_Y_FOR_CLICK,
        }
    }
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_HOVER_RANGE,
            duration: DEFAULT_HOVER_DURATION,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Clamp out-of-range tunables to their nearest valid bound
    pub fn sanitize(&mut self) {
        self.mapper.smoothing = self.mapper.smoothing.clamp(0.0, 1.0);
        self.gesture.deadzone_ratio = self
            .gesture
            .deadzone_ratio
            .clamp(DEADZONE_RATIO_MIN, DEADZONE_RATIO_MAX);
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.mapper.smoothing) {
            return Err(Error::ConfigError(
                "Smoothing must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.mapper.move_scale <= 0.0 {
            return Err(Error::ConfigError(
                "Move scale must be greater than 0".to_string(),
            ));
        }
        if !(DEADZONE_RATIO_MIN..=DEADZONE_RATIO_MAX).contains(&self.gesture.deadzone_ratio) {
            return Err(Error::ConfigError(format!(
                "Deadzone ratio must be between {DEADZONE_RATIO_MIN} and {DEADZONE_RATIO_MAX}"
            )));
        }
        if self.hover.range <= 0.0 {
            return Err(Error::ConfigError(
                "Hover range must be greater than 0".to_string(),
            ));
        }
        if self.hover.duration <= 0.0 {
            return Err(Error::ConfigError(
                "Hover duration must be greater than 0".to_string(),
            ));
        }
        if self.fps <= 0.0 {
            return Err(Error::ConfigError("FPS must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Mouse Control Configuration

# Coordinate mapping and smoothing
mapper:
  move_scale: 1.0
  smoothing: 0.8
  scale_alignment: "longer_range"
  statistical_filter: true

# Gesture recognition
gesture:
  deadzone_ratio: 2.1
  hand_lift_y_for_click: 0.02

# Hover-to-click
hover:
  range: 20.0
  duration: 2.0

# Interaction mode: disabled, move_only, grip_to_press, hover_to_click,
# move_grip_pressing, move_lift_clicking, thumb_buttons_wrist,
# thumb_buttons_hand_tip
mode: "move_only"

enabled: true
fps: 30.0
"#;
