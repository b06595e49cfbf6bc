//! Pointer device output for X11-based systems.
//!
//! The [`PointerSink`] trait is the downstream boundary of the gesture
//! pipeline: absolute moves plus press/release/click of a specific button.
//! Every call is a single synchronous device action; a failed call is logged
//! and dropped, never retried — the next frame's instruction supersedes it.

use crate::error::{AppError, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{ConnectionExt as _, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::ConnectionExt as _,
    },
    rust_connection::RustConnection,
    CURRENT_TIME,
};

/// Mouse button targeted by a press/release/click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// X11 core button number
    const fn detail(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
        }
    }
}

/// Downstream device that moves the pointer and presses buttons
pub trait PointerSink {
    /// Move the pointer to absolute screen coordinates (integer-truncated).
    /// Returns false when the device rejected the move.
    fn move_to(&mut self, x: f64, y: f64) -> bool;

    fn press_down(&mut self, button: MouseButton);

    fn press_up(&mut self, button: MouseButton);

    fn click(&mut self, button: MouseButton);
}

/// Pointer device implementation for X11
pub struct X11PointerDevice {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
}

impl X11PointerDevice {
    /// Connect to the X server and pick the default screen
    pub fn new() -> Result<Self> {
        info!("Initializing X11 pointer device");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::X11("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
        })
    }

    /// Screen dimensions in pixels
    pub const fn screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    fn warp_to(&self, x: i16, y: i16) -> Result<()> {
        debug!("Moving pointer to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::PointerDevice(format!("Failed to warp pointer: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| AppError::PointerDevice(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    fn fake_button(&self, event_type: u8, button: MouseButton) -> Result<()> {
        self.connection
            .xtest_fake_input(
                event_type,
                button.detail(),
                CURRENT_TIME,
                self.screen.root,
                0,
                0,
                0,
            )
            .map_err(|e| AppError::PointerDevice(format!("Failed to send button event: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| AppError::PointerDevice(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}

impl PointerSink for X11PointerDevice {
    fn move_to(&mut self, x: f64, y: f64) -> bool {
        // Truncate toward zero, then clamp to screen bounds
        let max_x = i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
        let max_y = i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
        let x = (x as i64).clamp(0, i64::from(max_x)) as i16;
        let y = (y as i64).clamp(0, i64::from(max_y)) as i16;

        match self.warp_to(x, y) {
            Ok(()) => true,
            Err(e) => {
                warn!("Pointer move failed: {}", e);
                false
            }
        }
    }

    fn press_down(&mut self, button: MouseButton) {
        debug!("Button press: {:?}", button);
        if let Err(e) = self.fake_button(BUTTON_PRESS_EVENT, button) {
            warn!("Button press failed: {}", e);
        }
    }

    fn press_up(&mut self, button: MouseButton) {
        debug!("Button release: {:?}", button);
        if let Err(e) = self.fake_button(BUTTON_RELEASE_EVENT, button) {
            warn!("Button release failed: {}", e);
        }
    }

    fn click(&mut self, button: MouseButton) {
        debug!("Button click: {:?}", button);
        let result = self
            .fake_button(BUTTON_PRESS_EVENT, button)
            .and_then(|()| self.fake_button(BUTTON_RELEASE_EVENT, button));
        if let Err(e) = result {
            warn!("Button click failed: {}", e);
        }
    }
}
