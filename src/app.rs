//! Main application module wiring the gesture pipeline together.

use crate::{
    config::Config,
    cursor::GestureCursor,
    error::Result,
    frame_source::{FrameSource, ReplaySource},
    geometry::Rect,
    pointer::{PointerSink, X11PointerDevice},
};
use log::info;
use std::time::{Duration, Instant};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where body frames come from
    pub frame_input: FrameInput,
    /// Pipeline tunables
    pub config: Config,
}

/// Frame input source
#[derive(Debug, Clone)]
pub enum FrameInput {
    /// Recorded tracking ticks, one JSON value per line
    Replay(String),
}

/// Gesture mouse application: frame source in, pointer actions out
pub struct GestureMouseApp<S: PointerSink> {
    cursor: GestureCursor<S>,
    source: Box<dyn FrameSource>,
    frame_interval: Duration,
}

impl GestureMouseApp<X11PointerDevice> {
    /// Build the application against the X11 pointer device
    pub fn new(app_config: AppConfig) -> Result<Self> {
        info!("Initializing gesture mouse control");

        let device = X11PointerDevice::new()?;
        let (width, height) = device.screen_size();
        let screen_rect = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));

        Self::with_sink(app_config, device, screen_rect)
    }
}

impl<S: PointerSink> GestureMouseApp<S> {
    /// Build against an arbitrary pointer sink (used by tests)
    pub fn with_sink(app_config: AppConfig, sink: S, output_rect: Rect) -> Result<Self> {
        let config = &app_config.config;
        config.validate()?;

        let source: Box<dyn FrameSource> = match &app_config.frame_input {
            FrameInput::Replay(path) => Box::new(ReplaySource::from_file(path)?),
        };

        let mut cursor = GestureCursor::new(sink, output_rect);
        cursor.set_move_scale(config.mapper.move_scale);
        cursor.set_smoothing(config.mapper.smoothing);
        cursor
            .mapper_mut()
            .set_scale_alignment(config.mapper.scale_alignment);
        if !config.mapper.statistical_filter {
            cursor.mapper_mut().set_statistical_stage(None);
        }
        cursor.set_deadzone_ratio(config.gesture.deadzone_ratio);
        cursor.set_hand_lift_y_for_click(config.gesture.hand_lift_y_for_click);
        cursor.set_hover_range(config.hover.range);
        cursor.set_hover_duration(Duration::from_secs_f64(config.hover.duration));
        cursor.set_enabled(config.enabled);
        cursor.set_mode(config.mode);

        info!("Control mode: {:?}, enabled: {}", config.mode, config.enabled);

        Ok(Self {
            cursor,
            source,
            frame_interval: Duration::from_secs_f64(1.0 / config.fps),
        })
    }

    /// Process all frame events, pacing them at the configured rate
    pub fn run(&mut self) -> Result<()> {
        info!("Starting frame loop");

        while let Some(event) = self.source.next_event() {
            self.cursor.handle_event(event, Instant::now());
            std::thread::sleep(self.frame_interval);
            self.cursor.tick(Instant::now());
        }

        // Drain a pending hover before shutting down
        if self.cursor.hover_duration() > Duration::ZERO {
            std::thread::sleep(self.cursor.hover_duration());
            self.cursor.tick(Instant::now());
        }

        info!("Frame source exhausted, shutting down");
        self.cursor.set_enabled(false);
        Ok(())
    }

    pub fn cursor(&self) -> &GestureCursor<S> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut GestureCursor<S> {
        &mut self.cursor
    }
}
