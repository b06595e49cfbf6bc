//! Mode-driven control state machine turning body frames into pointer actions.
//!
//! One [`GestureCursor`] consumes one [`FrameEvent`] at a time on a single
//! logical thread and drives the mapper and the pointer sink. It owns all
//! cross-frame interaction state: the active mode, the master enable flag,
//! which hand is driving the pointer, per-hand button grips, and the hover
//! dwell timer. The hover timer is a cancellable deadline polled from the same
//! thread via [`GestureCursor::tick`], so it can never fire concurrently with
//! frame handling.

use crate::body::{BodyFrame, HandSlot, HandState};
use crate::constants::{
    DEADZONE_RATIO_MAX, DEADZONE_RATIO_MIN, DEFAULT_DEADZONE_RATIO, DEFAULT_GESTURE_RECT,
    DEFAULT_HAND_LIFT_Y_FOR_CLICK, DEFAULT_HOVER_DURATION, DEFAULT_HOVER_RANGE, DEFAULT_SMOOTHING,
};
use crate::frame_source::FrameEvent;
use crate::geometry::{classify_xy, AngleClass, Rect, Vector2};
use crate::mapper::{CursorMapper, ScaleAlignment};
use crate::pointer::{MouseButton, PointerSink};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Interaction behavior selected from configuration/UI.
///
/// Exactly one mode is active at a time. Changing mode resets no interaction
/// state by itself; state resets happen on tracking loss (and on disabling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// No frame processing at all
    #[default]
    Disabled,
    /// Pointer movement only
    MoveOnly,
    /// Closing the controlling hand presses, opening releases
    GripToPress,
    /// Holding the pointer still for a dwell time fires one click
    HoverToClick,
    /// Two-hand mode: the second active hand grips to press
    MoveGripPressing,
    /// Lifting the free hand fires a one-shot click
    MoveLiftClicking,
    /// Thumb-pinch button routing, pointer driven by the wrist
    ThumbButtonsWrist,
    /// Thumb-pinch button routing, pointer driven by the hand tip
    ThumbButtonsHandTip,
}

impl ControlMode {
    /// Modes that route the pinch gesture to a specific mouse button and
    /// rescale the input envelope per person
    pub const fn uses_thumb_buttons(self) -> bool {
        matches!(self, Self::ThumbButtonsWrist | Self::ThumbButtonsHandTip)
    }
}

/// What the current gesture asks the pointer device to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerAction {
    None,
    ShouldPress,
    ShouldRelease,
    ShouldClick,
}

/// Per-hand button state: the press flag and which button it holds
#[derive(Debug, Clone, Copy, Default)]
struct HandGrip {
    pressed: bool,
    button: MouseButton,
}

/// Cancellable single-shot deadline for the hover gesture
#[derive(Debug)]
struct HoverTimer {
    duration: Duration,
    deadline: Option<Instant>,
}

impl HoverTimer {
    fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    fn toggle(&mut self, on: bool, now: Instant) {
        if on != self.is_running() {
            self.deadline = on.then(|| now + self.duration);
        }
    }

    fn stop(&mut self) {
        self.deadline = None;
    }

    fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

/// The gesture-to-pointer control state machine
pub struct GestureCursor<S: PointerSink> {
    sink: S,
    mapper: CursorMapper,
    mode: ControlMode,
    enabled: bool,
    deadzone_ratio: f64,
    hover_range: f64,
    hand_lift_y_for_click: f64,
    grips: [HandGrip; 2],
    /// The single hand currently driving the pointer; continuity is kept
    /// across frames so another lifted hand won't steal the cursor
    used_hand: Option<HandSlot>,
    last_cursor_pos: Vector2,
    hover: HoverTimer,
    hover_clicked: bool,
}

impl<S: PointerSink> GestureCursor<S> {
    /// Build a cursor targeting `output_rect` (usually the full screen),
    /// mapped from the default person-scale gesture rect
    pub fn new(sink: S, output_rect: Rect) -> Self {
        let (left, top, right, bottom) = DEFAULT_GESTURE_RECT;
        let gesture_rect = Rect::new(left, top, right, bottom);
        let mut mapper = CursorMapper::new(gesture_rect, output_rect, ScaleAlignment::LongerRange);
        mapper.set_smoothing(DEFAULT_SMOOTHING);

        Self {
            sink,
            mapper,
            mode: ControlMode::Disabled,
            enabled: true,
            deadzone_ratio: DEFAULT_DEADZONE_RATIO,
            hover_range: DEFAULT_HOVER_RANGE,
            hand_lift_y_for_click: DEFAULT_HAND_LIFT_Y_FOR_CLICK,
            grips: [HandGrip::default(); 2],
            used_hand: None,
            last_cursor_pos: Vector2::ZERO,
            hover: HoverTimer::new(Duration::from_secs_f64(DEFAULT_HOVER_DURATION)),
            hover_clicked: false,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Select the interaction mode. Disabling synchronously stops the hover
    /// timer and releases held buttons; any other change resets nothing.
    pub fn set_mode(&mut self, mode: ControlMode) {
        self.mode = mode;
        if mode == ControlMode::Disabled {
            self.hover.stop();
            self.release_grip(HandSlot::Left);
            self.release_grip(HandSlot::Right);
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Master enable flag; turning it off stops the hover timer and releases
    /// held buttons before returning
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.hover.stop();
            self.release_grip(HandSlot::Left);
            self.release_grip(HandSlot::Right);
        }
    }

    pub fn move_scale(&self) -> f64 {
        self.mapper.move_scale()
    }

    pub fn set_move_scale(&mut self, move_scale: f64) {
        self.mapper.set_move_scale(move_scale);
    }

    pub fn smoothing(&self) -> f64 {
        self.mapper.smoothing()
    }

    pub fn set_smoothing(&mut self, smoothing: f64) {
        self.mapper.set_smoothing(smoothing);
    }

    pub fn deadzone_ratio(&self) -> f64 {
        self.deadzone_ratio
    }

    /// Forearm multiplier for the activation deadzone; values outside the
    /// valid interval are clamped to the nearest bound
    pub fn set_deadzone_ratio(&mut self, ratio: f64) {
        self.deadzone_ratio = ratio.clamp(DEADZONE_RATIO_MIN, DEADZONE_RATIO_MAX);
    }

    pub fn hover_range(&self) -> f64 {
        self.hover_range
    }

    pub fn set_hover_range(&mut self, range: f64) {
        self.hover_range = range;
    }

    pub fn hover_duration(&self) -> Duration {
        self.hover.duration
    }

    pub fn set_hover_duration(&mut self, duration: Duration) {
        self.hover.duration = duration;
    }

    pub fn hand_lift_y_for_click(&self) -> f64 {
        self.hand_lift_y_for_click
    }

    pub fn set_hand_lift_y_for_click(&mut self, lift: f64) {
        self.hand_lift_y_for_click = lift;
    }

    pub fn used_hand(&self) -> Option<HandSlot> {
        self.used_hand
    }

    pub fn is_pressed(&self, slot: HandSlot) -> bool {
        self.grips[slot.index()].pressed
    }

    pub fn mapper_mut(&mut self) -> &mut CursorMapper {
        &mut self.mapper
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume one frame event and poll the hover timer
    pub fn handle_event(&mut self, event: FrameEvent, now: Instant) {
        match event {
            FrameEvent::Tracked(body) => self.process_frame(&body, now),
            FrameEvent::TrackingLost => self.on_tracking_lost(),
        }
        self.tick(now);
    }

    /// Poll the hover deadline. Called from the frame thread after each event
    /// and between events, so the dwell click also fires when frames pause.
    pub fn tick(&mut self, now: Instant) {
        if self.hover.expired(now) && !self.hover_clicked {
            debug!("Hover dwell elapsed, clicking");
            self.sink.click(MouseButton::Left);
            self.hover.stop();
            self.hover_clicked = true;
        }
    }

    fn process_frame(&mut self, body: &BodyFrame, now: Instant) {
        if self.mode == ControlMode::Disabled || !self.enabled {
            return;
        }
        if body.is_stop_gesture() {
            info!("Stop gesture detected, disabling control");
            // Releases held buttons; processing the rest of this frame could
            // immediately press one again
            self.set_enabled(false);
            return;
        }

        for slot in HandSlot::PRECEDENCE {
            if body.is_wrist_outside_deadzone(slot, self.deadzone_ratio) {
                match self.used_hand {
                    None => {
                        debug!("Hand {:?} takes pointer control", slot);
                        self.used_hand = Some(slot);
                    }
                    Some(used) if used != slot => {
                        // The non-used active hand is a button modifier in
                        // two-hand control mode
                        if self.mode == ControlMode::MoveGripPressing {
                            self.control_by_hand_state(
                                slot,
                                body.hand_state(slot),
                                MouseButton::Left,
                                false,
                            );
                        }
                        continue;
                    }
                    Some(_) => {}
                }

                self.drive_pointer(body, slot);
            } else if self.used_hand == Some(slot) {
                // Activation gesture ended
                self.used_hand = None;
                self.release_grip(slot);
            } else if self.mode == ControlMode::MoveLiftClicking {
                self.click_by_hand_lift(slot, body.wrist_relative(slot));
            } else {
                // Release when the button isn't regularly released, such as
                // per-hand tracking dropping out
                self.release_grip(slot);
            }
        }

        self.hover.toggle(
            self.mode == ControlMode::HoverToClick && self.used_hand.is_some(),
            now,
        );
    }

    /// Move the pointer from the used hand and run the mode's button logic
    fn drive_pointer(&mut self, body: &BodyFrame, slot: HandSlot) {
        if self.mode.uses_thumb_buttons() {
            // Per-person input envelope, rederived every frame so the control
            // range follows arm length
            let half = body.wrist_input_rect(slot);
            self.mapper
                .set_input_rect(Rect::new(-half.x, -half.y, half.x, half.y));
        }

        let mut input = if self.mode == ControlMode::ThumbButtonsHandTip {
            body.hand_tip_relative(slot)
        } else {
            body.wrist_relative(slot)
        };
        // Sensor up is screen down
        input.y = -input.y;

        let target = self.mapper.smoothed_output_position(input, 1.0);
        self.sink.move_to(target.x, target.y);

        match self.mode {
            ControlMode::GripToPress => {
                self.control_by_hand_state(slot, body.hand_state(slot), MouseButton::Left, false);
            }
            ControlMode::HoverToClick => {
                if (target - self.last_cursor_pos).magnitude() > self.hover_range {
                    self.hover.stop();
                    self.hover_clicked = false;
                }
                self.last_cursor_pos = target;
            }
            ControlMode::ThumbButtonsWrist | ControlMode::ThumbButtonsHandTip => {
                let is_click = body.is_thumb_click(slot);
                let thumb = body.thumb_relative(slot);
                let button = match classify_xy(thumb.x, thumb.y) {
                    // Thumb lying flat covers the left button, upright the
                    // right button, in between the middle one
                    AngleClass::Horizontal => MouseButton::Left,
                    AngleClass::Vertical => MouseButton::Right,
                    AngleClass::Diagonal => MouseButton::Middle,
                };
                self.control_by_hand_state(slot, body.hand_state(slot), button, is_click);
            }
            _ => {}
        }
    }

    fn control_by_hand_state(
        &mut self,
        slot: HandSlot,
        hand_state: HandState,
        button: MouseButton,
        is_click: bool,
    ) {
        let action = match hand_state {
            HandState::Closed => PointerAction::ShouldPress,
            HandState::Open => PointerAction::ShouldRelease,
            HandState::Unknown => PointerAction::None,
        };
        self.update_hand_control(slot, action, button, is_click);
    }

    fn click_by_hand_lift(&mut self, slot: HandSlot, hand_relative: Vector2) {
        let action = if hand_relative.y > self.hand_lift_y_for_click {
            PointerAction::ShouldClick
        } else {
            PointerAction::ShouldRelease
        };
        self.update_hand_control(slot, action, MouseButton::Left, false);
    }

    /// Edge-triggered button dispatch: the per-hand press flag guards every
    /// action so a held gesture cannot repeat device events
    fn update_hand_control(
        &mut self,
        slot: HandSlot,
        action: PointerAction,
        button: MouseButton,
        is_click: bool,
    ) {
        let index = slot.index();
        if self.mode.uses_thumb_buttons() {
            match action {
                PointerAction::ShouldPress if !self.grips[index].pressed => {
                    if is_click {
                        self.sink.click(button);
                    } else {
                        self.sink.press_down(button);
                    }
                    self.grips[index] = HandGrip {
                        pressed: true,
                        button,
                    };
                }
                PointerAction::ShouldRelease => self.release_grip(slot),
                _ => {}
            }
        } else {
            match action {
                PointerAction::ShouldClick if !self.grips[index].pressed => {
                    self.sink.click(MouseButton::Left);
                    self.grips[index].pressed = true;
                }
                PointerAction::ShouldPress if !self.grips[index].pressed => {
                    self.sink.press_down(MouseButton::Left);
                    self.grips[index].pressed = true;
                }
                PointerAction::ShouldRelease => self.release_grip(slot),
                _ => {}
            }
        }
    }

    /// Release whatever `slot` holds, targeting the button it pressed.
    /// Idempotent: a slot with nothing pressed stays untouched.
    fn release_grip(&mut self, slot: HandSlot) {
        let grip = &mut self.grips[slot.index()];
        if !grip.pressed {
            return;
        }
        if self.mode.uses_thumb_buttons() {
            // A click-armed grip has no press pending; send both edges so the
            // button cannot stay held either way
            let button = grip.button;
            self.sink.click(button);
            self.sink.press_up(button);
        } else {
            self.sink.press_up(MouseButton::Left);
        }
        self.grips[slot.index()].pressed = false;
    }

    /// The single place guaranteeing no button is left permanently held when
    /// tracking disappears
    fn on_tracking_lost(&mut self) {
        info!("Tracking lost, releasing input state");
        self.hover.stop();
        self.release_grip(HandSlot::Left);
        self.release_grip(HandSlot::Right);
        self.used_hand = None;
    }
}
