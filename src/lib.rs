//! Gesture mouse control library for driving a pointer with tracked body motion.
//!
//! This library turns a stream of 3D skeletal joint positions from a motion
//! sensor into continuous pointer coordinates and discrete button actions:
//! 1. Feature extraction classifies each frame's joints into semantic signals
//!    (deadzone activation, hand state, thumb pinch, stop gesture)
//! 2. The coordinate mapper converts the noisy shoulder-relative measurement
//!    into a stabilized screen position through chained smoothing stages
//! 3. A mode-driven state machine decides, frame by frame, whether to move
//!    the pointer and whether to press, release, or click a button
//!
//! # Examples
//!
//! ## Mapping a hand position to the screen
//!
//! ```
//! use gesture_mouse_control::geometry::{Rect, Vector2};
//! use gesture_mouse_control::mapper::{CursorMapper, ScaleAlignment};
//!
//! let gesture_rect = Rect::new(-0.18, 1.65, 0.18, -1.65);
//! let screen_rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);
//! let mut mapper = CursorMapper::new(gesture_rect, screen_rect, ScaleAlignment::LongerRange);
//! mapper.set_smoothing(0.8);
//!
//! let position = mapper.smoothed_output_position(Vector2::new(0.05, -0.4), 1.0);
//! assert!(position.x > 0.0 && position.y > 0.0);
//! ```
//!
//! ## Running the state machine against a pointer device
//!
//! ```no_run
//! use gesture_mouse_control::cursor::{ControlMode, GestureCursor};
//! use gesture_mouse_control::frame_source::{FrameEvent, FrameSource, ReplaySource};
//! use gesture_mouse_control::geometry::Rect;
//! use gesture_mouse_control::pointer::X11PointerDevice;
//! use std::time::Instant;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let device = X11PointerDevice::new()?;
//! let (width, height) = device.screen_size();
//! let screen = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
//!
//! let mut cursor = GestureCursor::new(device, screen);
//! cursor.set_mode(ControlMode::GripToPress);
//!
//! let mut source = ReplaySource::from_file("session.jsonl")?;
//! while let Some(event) = source.next_event() {
//!     cursor.handle_event(event, Instant::now());
//! }
//! # Ok(())
//! # }
//! ```

/// Geometry value types and pure classification helpers
pub mod geometry;

/// Body frames and per-hand feature extraction
pub mod body;

/// Coordinate mapping with configurable scale alignment and smoothing
pub mod mapper;

/// Smoothing stages for stabilizing the cursor position
pub mod filters;

/// Mode-driven control state machine
pub mod cursor;

/// Frame delivery with tracking-loss debouncing
pub mod frame_source;

/// Pointer device output (X11)
pub mod pointer;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
