//! Constants used throughout the application

/// tan(30°), lower angle-bucket threshold
pub const TAN_30_DEGREES: f64 = 0.57735026919;

/// tan(60°), upper angle-bucket threshold
pub const TAN_60_DEGREES: f64 = 1.73205080757;

/// Default sensitivity multiplier applied on top of the alignment scale
pub const DEFAULT_MOVE_SCALE: f64 = 1.0;

/// Default exponential smoothing factor (0 = no smoothing, 1 = frozen)
pub const DEFAULT_SMOOTHING: f64 = 0.80;

/// Default hover break distance in pixels
pub const DEFAULT_HOVER_RANGE: f64 = 20.0;

/// Default hover dwell time in seconds
pub const DEFAULT_HOVER_DURATION: f64 = 2.0;

/// Default forearm-length multiplier building the activation deadzone
pub const DEFAULT_DEADZONE_RATIO: f64 = 2.1;

/// Valid deadzone ratio interval (boundary-inclusive); out-of-range values clamp
pub const DEADZONE_RATIO_MIN: f64 = 0.5;
pub const DEADZONE_RATIO_MAX: f64 = 5.0;

/// Wrist lift that fires a one-shot click in lift-clicking mode (meters)
pub const DEFAULT_HAND_LIFT_Y_FOR_CLICK: f64 = 0.02;

/// Hand z-offset in front of the spine base for the lift-forward gesture (meters)
pub const HAND_LIFT_Z_DISTANCE: f64 = 0.15;

/// Thumb pinched against the hand tip within this distance is a click (meters)
pub const THUMB_CLICK_DISTANCE: f64 = 0.005;

/// Maximum wrist-to-wrist distance for the stop gesture (meters)
pub const STOP_GESTURE_WRIST_DISTANCE: f64 = 0.10;

/// |y| must dominate |x| and |z| scaled by this factor for the 3D vertical test
pub const VERTICAL_DOMINANCE_FACTOR: f64 = 0.9;

/// Input rect half-extent as a fraction of forearm length
pub const INPUT_RECT_FOREARM_FACTOR: f64 = 0.25;

/// Default gesture input rect (left, top, right, bottom), worked out by
/// pointing at the screen edges and noting the shoulder-relative values.
/// Approximately fits most people.
pub const DEFAULT_GESTURE_RECT: (f64, f64, f64, f64) = (-0.18, 1.65, 0.18, -1.65);

/// Consecutive untracked frames allowed before tracking is declared lost
pub const MAX_LOST_TRACKING_FRAMES: u32 = 5;

/// Exponential smoothing clamp bounds
pub const SMOOTHING_MIN: f64 = 0.0;
pub const SMOOTHING_MAX: f64 = 1.0;

/// Statistical stage defaults (process / measurement noise)
pub const DEFAULT_KALMAN_PROCESS_NOISE: f64 = 0.05;
pub const DEFAULT_KALMAN_MEASUREMENT_NOISE: f64 = 0.3;

/// Default replay pacing
pub const DEFAULT_FPS: f64 = 30.0;
