use serde::{Deserialize, Serialize};

use crate::geometry::Point;

// ── Landmarks ───────────────────────────────────────────────────────────────

/// One tracked landmark in normalized image coordinates (`0.0..=1.0`,
/// y grows downward).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Minimum landmark count a detector must report per hand.
pub const LANDMARKS_PER_HAND: usize = 21;

const INDEX_MID: usize = 6;
const INDEX_TIP: usize = 8;
const MIDDLE_MID: usize = 10;
const MIDDLE_TIP: usize = 12;
const RING_MID: usize = 14;
const RING_TIP: usize = 16;
const PINKY_MID: usize = 18;
const PINKY_TIP: usize = 20;

/// The eight landmarks pose classification reads, by name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub index_tip: Landmark,
    pub index_mid: Landmark,
    pub middle_tip: Landmark,
    pub middle_mid: Landmark,
    pub ring_tip: Landmark,
    pub ring_mid: Landmark,
    pub pinky_tip: Landmark,
    pub pinky_mid: Landmark,
}

impl HandLandmarks {
    /// Pick the named landmarks out of a detector's indexed array.
    ///
    /// Returns `None` if fewer than [`LANDMARKS_PER_HAND`] points are given.
    pub fn from_indexed(points: &[Landmark]) -> Option<Self> {
        if points.len() < LANDMARKS_PER_HAND {
            return None;
        }
        Some(Self {
            index_tip: points[INDEX_TIP],
            index_mid: points[INDEX_MID],
            middle_tip: points[MIDDLE_TIP],
            middle_mid: points[MIDDLE_MID],
            ring_tip: points[RING_TIP],
            ring_mid: points[RING_MID],
            pinky_tip: points[PINKY_TIP],
            pinky_mid: points[PINKY_MID],
        })
    }

    /// Canvas position of the "pen": midway between the index and middle
    /// fingertips, scaled to a `width × height` canvas.
    pub fn pen_position(&self, width: f32, height: f32) -> Point {
        Point::new(
            (self.index_tip.x + self.middle_tip.x) * 0.5 * width,
            (self.index_tip.y + self.middle_tip.y) * 0.5 * height,
        )
    }
}

// ── Handedness ──────────────────────────────────────────────────────────────

/// Which hand the detector believes it saw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left hand",
            Self::Right => "right hand",
        }
    }
}

// ── Pose classification ─────────────────────────────────────────────────────

/// Discrete hand pose driving the drawing state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandPose {
    /// Index and middle extended, ring folded ("sword fingers"): draw.
    Pointing,
    /// All four fingers extended: clear (left) or release (right).
    Palm,
    /// Index and middle folded: lift the pen.
    Fist,
    /// Anything else: no action.
    Other,
}

#[inline]
fn extended(tip: Landmark, mid: Landmark) -> bool {
    tip.y < mid.y
}

#[inline]
fn folded(tip: Landmark, mid: Landmark) -> bool {
    tip.y > mid.y
}

/// Classify one hand. Pure function of landmark heights.
///
/// PALM is tested before POINTING: an open hand has strictly more fingers
/// extended, so it wins whenever both tests pass.
pub fn classify(hand: &HandLandmarks) -> HandPose {
    let index_up = extended(hand.index_tip, hand.index_mid);
    let middle_up = extended(hand.middle_tip, hand.middle_mid);

    let is_palm = index_up
        && middle_up
        && extended(hand.ring_tip, hand.ring_mid)
        && extended(hand.pinky_tip, hand.pinky_mid);
    let is_pointing = index_up && middle_up && folded(hand.ring_tip, hand.ring_mid);
    let is_fist = folded(hand.index_tip, hand.index_mid) && folded(hand.middle_tip, hand.middle_mid);

    if is_palm {
        HandPose::Palm
    } else if is_pointing {
        HandPose::Pointing
    } else if is_fist {
        HandPose::Fist
    } else {
        HandPose::Other
    }
}

/// One detected hand in one perception frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub handedness: Handedness,
    pub landmarks: HandLandmarks,
}

impl HandObservation {
    pub fn pose(&self) -> HandPose {
        classify(&self.landmarks)
    }
}
