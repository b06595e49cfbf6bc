//! Upstream frame delivery: tracked-body events with loss debouncing.
//!
//! Sensor acquisition itself lives outside this crate; what comes in here is a
//! per-tick `Option<BodyFrame>` ("a body was tracked this tick, or not"). The
//! [`TrackingDebouncer`] turns that into a sequence of [`FrameEvent`]s where a
//! tracking-lost notification is raised only after several consecutive
//! untracked ticks, so flicker never resets downstream state. Events are
//! consumed one at a time by polling — no callback multicast.

use crate::body::BodyFrame;
use crate::constants::MAX_LOST_TRACKING_FRAMES;
use crate::error::{Error, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One event from the frame source
#[derive(Debug, Clone)]
pub enum FrameEvent {
    /// A body was tracked this tick
    Tracked(BodyFrame),
    /// Tracking disappeared for long enough to count as lost
    TrackingLost,
}

/// A sequence of frame events consumed one at a time
pub trait FrameSource {
    /// Next event, or `None` when the source is exhausted
    fn next_event(&mut self) -> Option<FrameEvent>;
}

/// Turns per-tick tracking observations into debounced frame events.
///
/// Some lost frames are allowed before the loss event fires, so the result
/// won't get stuck on instant small frame losses and reads as continuous.
/// Once lost, the debouncer re-arms only when a body is tracked again.
#[derive(Debug)]
pub struct TrackingDebouncer {
    max_lost_frames: u32,
    /// `None` until the first body is tracked, and again after a loss event
    lost_frames: Option<u32>,
}

impl Default for TrackingDebouncer {
    fn default() -> Self {
        Self::new(MAX_LOST_TRACKING_FRAMES)
    }
}

impl TrackingDebouncer {
    pub fn new(max_lost_frames: u32) -> Self {
        Self {
            max_lost_frames,
            lost_frames: None,
        }
    }

    /// Feed one tick's observation, get the event it produces (if any)
    pub fn observe(&mut self, body: Option<BodyFrame>) -> Option<FrameEvent> {
        match body {
            Some(frame) => {
                self.lost_frames = Some(0);
                Some(FrameEvent::Tracked(frame))
            }
            None => {
                let lost = self.lost_frames.as_mut()?;
                *lost += 1;
                if *lost > self.max_lost_frames {
                    debug!("Tracking lost after {} untracked frames", *lost);
                    self.lost_frames = None;
                    Some(FrameEvent::TrackingLost)
                } else {
                    None
                }
            }
        }
    }
}

/// Replays recorded tracking ticks from a JSON-lines file.
///
/// Each line is either a serialized [`BodyFrame`] or `null` for an untracked
/// tick; observations run through a [`TrackingDebouncer`] like live input.
pub struct ReplaySource {
    ticks: std::vec::IntoIter<Option<BodyFrame>>,
    debouncer: TrackingDebouncer,
}

impl ReplaySource {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading replay file: {}", path.display());

        let reader = BufReader::new(File::open(path)?);
        let mut ticks = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let tick: Option<BodyFrame> = serde_json::from_str(&line).map_err(|e| {
                Error::ReplayError(format!("line {}: {}", line_no + 1, e))
            })?;
            ticks.push(tick);
        }

        info!("Replay loaded: {} ticks", ticks.len());
        Ok(Self {
            ticks: ticks.into_iter(),
            debouncer: TrackingDebouncer::default(),
        })
    }
}

impl FrameSource for ReplaySource {
    fn next_event(&mut self) -> Option<FrameEvent> {
        // A tick that produces no event (untracked but within the debounce
        // window) is simply "no update"; keep pulling until something happens
        // or the recording ends.
        for tick in self.ticks.by_ref() {
            if let Some(event) = self.debouncer.observe(tick) {
                return Some(event);
            }
        }
        None
    }
}
