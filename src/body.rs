//! Skeletal body frames and per-hand feature extraction.
//!
//! A [`BodyFrame`] is one tracked person's joint set for one sensor tick. It is
//! frame-scoped: the extractor methods only read it and nothing retains it past
//! the current call. All predicates degrade gracefully on missing or zeroed
//! joints by evaluating false rather than erroring.

use crate::constants::{
    HAND_LIFT_Z_DISTANCE, INPUT_RECT_FOREARM_FACTOR, STOP_GESTURE_WRIST_DISTANCE,
    THUMB_CLICK_DISTANCE, VERTICAL_DOMINANCE_FACTOR,
};
use crate::geometry::{classify_xy, distance, is_vertical_3d, relative, AngleClass, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// One of the two hand slots. The numeric value doubles as a state-array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandSlot {
    Left = 0,
    Right = 1,
}

impl HandSlot {
    /// Both slots, right hand first: when both hands satisfy an activation
    /// predicate on the same frame, the right hand wins the tie.
    pub const PRECEDENCE: [Self; 2] = [Self::Right, Self::Left];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Open/closed state reported by the sensor for one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandState {
    Open,
    Closed,
    #[default]
    Unknown,
}

/// Joint positions for one arm
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ArmJoints {
    pub shoulder: Point3,
    pub elbow: Point3,
    pub wrist: Point3,
    pub hand: Point3,
    pub hand_tip: Point3,
    pub thumb: Point3,
}

/// One tracked person's joint set for one sensor tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyFrame {
    /// Stable per-person tracking identifier
    pub tracking_id: u64,
    pub spine_base: Point3,
    pub spine_shoulder: Point3,
    /// Indexed by [`HandSlot`]
    pub arms: [ArmJoints; 2],
    /// Indexed by [`HandSlot`]
    pub hand_states: [HandState; 2],
}

impl BodyFrame {
    pub fn arm(&self, side: HandSlot) -> &ArmJoints {
        &self.arms[side.index()]
    }

    pub fn hand_state(&self, side: HandSlot) -> HandState {
        self.hand_states[side.index()]
    }

    /// Elbow-to-wrist length in meters, used to scale thresholds per person
    pub fn forearm_length(&self, side: HandSlot) -> f64 {
        let arm = self.arm(side);
        distance(arm.elbow, arm.wrist)
    }

    /// Primary "hand is actively controlling" predicate: the wrist has moved
    /// forward of the spine shoulder by more than `forearm × ratio`. A zero
    /// deadzone (missing joints collapse to the origin) always fails.
    pub fn is_wrist_outside_deadzone(&self, side: HandSlot, deadzone_ratio: f64) -> bool {
        let deadzone = self.forearm_length(side) * deadzone_ratio;
        if deadzone == 0.0 {
            return false;
        }
        let arm = self.arm(side);
        arm.wrist.z - self.spine_shoulder.z < -deadzone
    }

    /// Older activation variant: hand z a fixed distance in front of the spine base
    pub fn is_hand_lift_forward(&self, side: HandSlot) -> bool {
        self.arm(side).hand.z - self.spine_base.z < -HAND_LIFT_Z_DISTANCE
    }

    /// XY-plane vector from the active-side shoulder to the wrist,
    /// the raw pointer-position signal
    pub fn wrist_relative(&self, side: HandSlot) -> Vector2 {
        let arm = self.arm(side);
        relative(arm.shoulder, arm.wrist).project_xy()
    }

    /// XY-plane vector from the active-side shoulder to the hand tip
    pub fn hand_tip_relative(&self, side: HandSlot) -> Vector2 {
        let arm = self.arm(side);
        relative(arm.shoulder, arm.hand_tip).project_xy()
    }

    /// Symmetric input-rect half-extents scaled from forearm length,
    /// re-derived every frame so the control envelope adapts to arm length
    pub fn wrist_input_rect(&self, side: HandSlot) -> Vector2 {
        let half = self.forearm_length(side) * INPUT_RECT_FOREARM_FACTOR;
        Vector2::new(half, half)
    }

    /// Thumb pinched against the hand tip
    pub fn is_thumb_click(&self, side: HandSlot) -> bool {
        let arm = self.arm(side);
        distance(arm.hand_tip, arm.thumb) <= THUMB_CLICK_DISTANCE
    }

    /// Vector from hand to thumb; its XY tangent selects which mouse button a
    /// pinch gesture targets
    pub fn thumb_relative(&self, side: HandSlot) -> Vector3 {
        let arm = self.arm(side);
        relative(arm.hand, arm.thumb)
    }

    /// Kill-switch gesture: arms crossed with open hands. Wrists within 10 cm,
    /// both hands Open, and each forearm diagonal in XY as well as vertical in
    /// 3D. Requiring Open on both hands is the strict reading; a looser one
    /// would accept Unknown states and trust the geometric checks alone.
    pub fn is_stop_gesture(&self) -> bool {
        let left = self.arm(HandSlot::Left);
        let right = self.arm(HandSlot::Right);

        if distance(left.wrist, right.wrist) > STOP_GESTURE_WRIST_DISTANCE {
            return false;
        }
        if self.hand_state(HandSlot::Left) != HandState::Open
            || self.hand_state(HandSlot::Right) != HandState::Open
        {
            return false;
        }

        [left, right].into_iter().all(|arm| {
            let forearm = relative(arm.elbow, arm.wrist);
            classify_xy(forearm.x, forearm.y) == AngleClass::Diagonal
                && is_vertical_3d(forearm, VERTICAL_DOMINANCE_FACTOR)
        })
    }
}
