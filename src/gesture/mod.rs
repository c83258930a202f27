//! Gesture input: hand poses, stroke capture and rune recognition.

pub mod pose;
pub mod rune;
pub mod stroke;

pub use pose::{classify, HandLandmarks, HandObservation, HandPose, Handedness, Landmark};
pub use rune::{analyze, recognize, GestureId, RuneMetrics};
pub use stroke::StrokeCapture;
