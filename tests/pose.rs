use runecast::gesture::pose::LANDMARKS_PER_HAND;
use runecast::gesture::{classify, HandLandmarks, HandObservation, HandPose, Handedness, Landmark};

/// Build a hand from per-finger (tip_y, mid_y) pairs. Smaller y = higher.
fn hand(index: (f32, f32), middle: (f32, f32), ring: (f32, f32), pinky: (f32, f32)) -> HandLandmarks {
    HandLandmarks {
        index_tip: Landmark::new(0.40, index.0),
        index_mid: Landmark::new(0.40, index.1),
        middle_tip: Landmark::new(0.45, middle.0),
        middle_mid: Landmark::new(0.45, middle.1),
        ring_tip: Landmark::new(0.50, ring.0),
        ring_mid: Landmark::new(0.50, ring.1),
        pinky_tip: Landmark::new(0.55, pinky.0),
        pinky_mid: Landmark::new(0.55, pinky.1),
    }
}

const UP: (f32, f32) = (0.2, 0.4);
const DOWN: (f32, f32) = (0.6, 0.4);

#[test]
fn two_fingers_up_is_pointing() {
    assert_eq!(classify(&hand(UP, UP, DOWN, DOWN)), HandPose::Pointing);
    // The pinky is not part of the pointing rule.
    assert_eq!(classify(&hand(UP, UP, DOWN, UP)), HandPose::Pointing);
}

#[test]
fn all_fingers_up_is_palm() {
    assert_eq!(classify(&hand(UP, UP, UP, UP)), HandPose::Palm);
}

#[test]
fn index_and_middle_folded_is_fist() {
    assert_eq!(classify(&hand(DOWN, DOWN, DOWN, DOWN)), HandPose::Fist);
    assert_eq!(classify(&hand(DOWN, DOWN, UP, UP)), HandPose::Fist);
}

#[test]
fn mixed_fingers_are_other() {
    assert_eq!(classify(&hand(UP, DOWN, DOWN, DOWN)), HandPose::Other);
    // Ring up but pinky down: neither palm nor pointing.
    assert_eq!(classify(&hand(UP, UP, UP, DOWN)), HandPose::Other);
}

#[test]
fn level_tip_and_joint_is_neither_up_nor_down() {
    let level = (0.4, 0.4);
    assert_eq!(classify(&hand(level, level, DOWN, DOWN)), HandPose::Other);
}

#[test]
fn from_indexed_picks_named_landmarks() {
    let points: Vec<Landmark> = (0..LANDMARKS_PER_HAND)
        .map(|i| Landmark::new(i as f32 / 100.0, i as f32 / 10.0))
        .collect();
    let hand = HandLandmarks::from_indexed(&points).expect("21 landmarks");
    assert_eq!(hand.index_tip, points[8]);
    assert_eq!(hand.index_mid, points[6]);
    assert_eq!(hand.middle_tip, points[12]);
    assert_eq!(hand.middle_mid, points[10]);
    assert_eq!(hand.ring_tip, points[16]);
    assert_eq!(hand.ring_mid, points[14]);
    assert_eq!(hand.pinky_tip, points[20]);
    assert_eq!(hand.pinky_mid, points[18]);
}

#[test]
fn from_indexed_rejects_short_arrays() {
    let points = vec![Landmark::default(); LANDMARKS_PER_HAND - 1];
    assert!(HandLandmarks::from_indexed(&points).is_none());
}

#[test]
fn pen_sits_between_index_and_middle_tips() {
    let mut h = hand(UP, UP, DOWN, DOWN);
    h.index_tip = Landmark::new(0.2, 0.4);
    h.middle_tip = Landmark::new(0.4, 0.2);
    let pen = h.pen_position(500.0, 500.0);
    assert!((pen.x - 150.0).abs() < 1e-3);
    assert!((pen.y - 150.0).abs() < 1e-3);
}

#[test]
fn observation_derives_pose_on_demand() {
    let obs = HandObservation { handedness: Handedness::Left, landmarks: hand(UP, UP, UP, UP) };
    assert_eq!(obs.pose(), HandPose::Palm);
    assert_eq!(obs.handedness.as_str(), "left hand");
}
