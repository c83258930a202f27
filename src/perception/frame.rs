use std::sync::Arc;

use serde::Deserialize;

use crate::gesture::{HandLandmarks, HandObservation, Handedness, Landmark};

// ── Video input ─────────────────────────────────────────────────────────────

/// One camera frame, shared with the detector without copying.
#[derive(Clone, Debug)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    /// Packed RGBA8 pixels.
    pub pixels: Arc<[u8]>,
}

/// The camera, owned above the battle and handed in by reference.
/// The battle never starts or stops it.
pub trait CameraFeed {
    /// The current frame, or `None` while the stream is not ready.
    fn frame(&self) -> Option<VideoFrame>;
}

// ── Detector output ─────────────────────────────────────────────────────────

/// Detector result for one video frame: zero, one or two hands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerceptionFrame {
    pub hands: Vec<HandObservation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrame {
    #[serde(default)]
    multi_hand_landmarks: Vec<Vec<Landmark>>,
    #[serde(default)]
    multi_handedness: Vec<RawHandedness>,
}

#[derive(Deserialize)]
struct RawHandedness {
    label: String,
}

impl PerceptionFrame {
    pub fn new(hands: Vec<HandObservation>) -> Self {
        Self { hands }
    }

    /// Deserialise a frame from the detector's native JSON shape:
    ///
    /// ```json
    /// { "multiHandLandmarks": [[{ "x": 0.5, "y": 0.4 }, ...21 points]],
    ///   "multiHandedness": [{ "label": "Right" }] }
    /// ```
    ///
    /// Extra landmark fields (`z`, `visibility`) are ignored. Hands with too
    /// few landmarks or an unrecognised label are skipped. Returns a
    /// `serde_json::Error` only if the JSON itself is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawFrame = serde_json::from_str(json)?;

        let hands = raw
            .multi_hand_landmarks
            .iter()
            .zip(raw.multi_handedness.iter())
            .filter_map(|(points, handedness)| {
                let handedness = match handedness.label.as_str() {
                    "Left" => Handedness::Left,
                    "Right" => Handedness::Right,
                    other => {
                        log::debug!("[perception] skipping hand with label '{other}'");
                        return None;
                    }
                };
                let landmarks = HandLandmarks::from_indexed(points)?;
                Some(HandObservation { handedness, landmarks })
            })
            .collect();

        Ok(Self { hands })
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}
