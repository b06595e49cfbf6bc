//! End-to-end tests for the gesture pipeline: body frames in, pointer calls out

use gesture_mouse_control::body::{ArmJoints, BodyFrame, HandSlot, HandState};
use gesture_mouse_control::cursor::{ControlMode, GestureCursor};
use gesture_mouse_control::frame_source::{FrameEvent, TrackingDebouncer};
use gesture_mouse_control::geometry::{Point3, Rect};
use gesture_mouse_control::pointer::{MouseButton, PointerSink};
use std::time::{Duration, Instant};

/// Records every pointer call instead of driving a real device
#[derive(Default)]
struct RecordingSink {
    calls: Vec<String>,
}

impl PointerSink for RecordingSink {
    fn move_to(&mut self, x: f64, y: f64) -> bool {
        self.calls.push(format!("move({x:.0},{y:.0})"));
        true
    }

    fn press_down(&mut self, button: MouseButton) {
        self.calls.push(format!("down({button:?})"));
    }

    fn press_up(&mut self, button: MouseButton) {
        self.calls.push(format!("up({button:?})"));
    }

    fn click(&mut self, button: MouseButton) {
        self.calls.push(format!("click({button:?})"));
    }
}

fn new_cursor() -> GestureCursor<RecordingSink> {
    GestureCursor::new(RecordingSink::default(), Rect::new(0.0, 0.0, 1920.0, 1080.0))
}

/// A frame whose given hand is stretched forward past the activation deadzone
fn active_frame(slot: HandSlot) -> BodyFrame {
    let mut frame = BodyFrame::default();
    frame.spine_shoulder = Point3::new(0.0, 1.4, 2.0);
    frame.arms[slot.index()] = ArmJoints {
        shoulder: Point3::new(0.0, 1.4, 2.0),
        elbow: Point3::new(0.1, 1.25, 1.45),
        wrist: Point3::new(0.1, 1.3, 1.2),
        hand: Point3::new(0.1, 1.3, 1.15),
        hand_tip: Point3::new(0.1, 1.32, 1.1),
        thumb: Point3::new(0.15, 1.3, 1.15),
    };
    frame
}

/// A full drag session: reach forward, close the fist, drag, open, retreat
#[test]
fn test_grip_drag_session_call_order() {
    let mut cursor = new_cursor();
    cursor.set_mode(ControlMode::GripToPress);
    let t0 = Instant::now();

    // Reach forward with an open hand: pointer moves, nothing pressed
    let mut frame = active_frame(HandSlot::Right);
    frame.hand_states[HandSlot::Right.index()] = HandState::Open;
    cursor.handle_event(FrameEvent::Tracked(frame.clone()), t0);

    // Close the fist and drag across two frames
    frame.hand_states[HandSlot::Right.index()] = HandState::Closed;
    cursor.handle_event(FrameEvent::Tracked(frame.clone()), t0);
    frame.arms[HandSlot::Right.index()].wrist.x = 0.05;
    cursor.handle_event(FrameEvent::Tracked(frame.clone()), t0);

    // Open the hand, then retreat inside the deadzone
    frame.hand_states[HandSlot::Right.index()] = HandState::Open;
    cursor.handle_event(FrameEvent::Tracked(frame), t0);
    cursor.handle_event(FrameEvent::Tracked(BodyFrame::default()), t0);

    let calls = &cursor.sink().calls;
    let down = calls.iter().position(|c| c == "down(Left)").unwrap();
    let up = calls.iter().position(|c| c == "up(Left)").unwrap();
    assert!(down < up, "press must precede release: {calls:?}");
    assert_eq!(calls.iter().filter(|c| *c == "down(Left)").count(), 1);
    assert_eq!(calls.iter().filter(|c| *c == "up(Left)").count(), 1);
    // Every frame with an active hand moved the pointer
    assert_eq!(calls.iter().filter(|c| c.starts_with("move(")).count(), 4);
    assert_eq!(cursor.used_hand(), None);
}

/// Tracking flicker must not release a held button; a debounced loss must
#[test]
fn test_debounced_loss_releases_held_button() {
    let mut cursor = new_cursor();
    cursor.set_mode(ControlMode::GripToPress);
    let mut debouncer = TrackingDebouncer::new(5);
    let t0 = Instant::now();

    let mut frame = active_frame(HandSlot::Right);
    frame.hand_states[HandSlot::Right.index()] = HandState::Closed;
    if let Some(event) = debouncer.observe(Some(frame.clone())) {
        cursor.handle_event(event, t0);
    }
    assert!(cursor.is_pressed(HandSlot::Right));

    // Four untracked ticks: inside the debounce window, grip stays held
    for _ in 0..4 {
        assert!(debouncer.observe(None).is_none());
    }
    assert!(cursor.is_pressed(HandSlot::Right));

    // Tracking comes back; counter resets, still held
    if let Some(event) = debouncer.observe(Some(frame)) {
        cursor.handle_event(event, t0);
    }
    assert!(cursor.is_pressed(HandSlot::Right));

    // Now a real loss: window expires and the button is released
    let mut released = false;
    for _ in 0..6 {
        if let Some(event) = debouncer.observe(None) {
            cursor.handle_event(event, t0);
            released = true;
        }
    }
    assert!(released);
    assert!(!cursor.is_pressed(HandSlot::Right));
    assert!(cursor.sink().calls.contains(&"up(Left)".to_string()));
}

/// Hover dwell over explicit timestamps: move, hold, click once, move, hold
#[test]
fn test_hover_session_clicks_per_dwell() {
    let mut cursor = new_cursor();
    cursor.set_mode(ControlMode::HoverToClick);
    cursor.set_hover_duration(Duration::from_millis(500));
    cursor.set_smoothing(0.0);
    cursor.mapper_mut().set_statistical_stage(None);
    let t0 = Instant::now();

    let frame = active_frame(HandSlot::Right);
    cursor.handle_event(FrameEvent::Tracked(frame.clone()), t0);
    cursor.handle_event(
        FrameEvent::Tracked(frame.clone()),
        t0 + Duration::from_millis(700),
    );

    let clicks = |cursor: &GestureCursor<RecordingSink>| {
        cursor
            .sink()
            .calls
            .iter()
            .filter(|c| *c == "click(Left)")
            .count()
    };
    assert_eq!(clicks(&cursor), 1);

    // Move far, then dwell again: second click
    let mut moved = frame;
    moved.arms[HandSlot::Right.index()].wrist.x = -0.1;
    cursor.handle_event(
        FrameEvent::Tracked(moved.clone()),
        t0 + Duration::from_millis(800),
    );
    cursor.handle_event(
        FrameEvent::Tracked(moved),
        t0 + Duration::from_millis(1500),
    );
    assert_eq!(clicks(&cursor), 2);
}

/// Thumb-button mode across a session: press right, release, pinch left
#[test]
fn test_thumb_button_session() {
    let mut cursor = new_cursor();
    cursor.set_mode(ControlMode::ThumbButtonsWrist);
    let t0 = Instant::now();

    // Upright thumb with a closed hand presses the right button
    let mut frame = active_frame(HandSlot::Right);
    let arm = &mut frame.arms[HandSlot::Right.index()];
    arm.thumb = Point3::new(arm.hand.x + 0.002, arm.hand.y + 0.03, arm.hand.z);
    frame.hand_states[HandSlot::Right.index()] = HandState::Closed;
    cursor.handle_event(FrameEvent::Tracked(frame.clone()), t0);
    assert!(cursor.sink().calls.contains(&"down(Right)".to_string()));

    // Open hand releases the same button
    frame.hand_states[HandSlot::Right.index()] = HandState::Open;
    cursor.handle_event(FrameEvent::Tracked(frame.clone()), t0);
    assert!(cursor.sink().calls.contains(&"up(Right)".to_string()));

    // Flat thumb pinched against the hand tip clicks the left button
    let arm = &mut frame.arms[HandSlot::Right.index()];
    arm.thumb = Point3::new(arm.hand.x + 0.03, arm.hand.y + 0.002, arm.hand.z);
    arm.hand_tip = Point3::new(arm.thumb.x + 0.003, arm.thumb.y, arm.thumb.z);
    frame.hand_states[HandSlot::Right.index()] = HandState::Closed;
    cursor.handle_event(FrameEvent::Tracked(frame), t0);
    assert!(cursor.sink().calls.contains(&"click(Left)".to_string()));
}

/// Crossing open arms must disable the whole pipeline mid-session
#[test]
fn test_stop_gesture_ends_session() {
    let mut cursor = new_cursor();
    cursor.set_mode(ControlMode::GripToPress);
    let t0 = Instant::now();

    let mut frame = active_frame(HandSlot::Right);
    frame.hand_states[HandSlot::Right.index()] = HandState::Closed;
    cursor.handle_event(FrameEvent::Tracked(frame), t0);
    assert!(cursor.is_pressed(HandSlot::Right));

    let mut stop = BodyFrame::default();
    stop.arms[HandSlot::Left.index()] = ArmJoints {
        elbow: Point3::new(0.25, 1.0, 1.9),
        wrist: Point3::new(0.02, 1.30, 2.0),
        ..ArmJoints::default()
    };
    stop.arms[HandSlot::Right.index()] = ArmJoints {
        elbow: Point3::new(-0.25, 1.0, 1.9),
        wrist: Point3::new(-0.02, 1.30, 2.0),
        ..ArmJoints::default()
    };
    stop.hand_states = [HandState::Open, HandState::Open];
    cursor.handle_event(FrameEvent::Tracked(stop), t0);

    assert!(!cursor.enabled());
    assert!(!cursor.is_pressed(HandSlot::Right));
    assert!(cursor.sink().calls.contains(&"up(Left)".to_string()));

    // Nothing moves any more
    let calls_before = cursor.sink().calls.len();
    cursor.handle_event(FrameEvent::Tracked(active_frame(HandSlot::Right)), t0);
    assert_eq!(cursor.sink().calls.len(), calls_before);
}
