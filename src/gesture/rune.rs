// =============================================================================
// RUNE.RS: Heuristic rune recognition
//
// Classifies a flattened point set into one of four spell symbols using only
// bounding box, closure and sharp-turn counts. No templates, no training:
// cheap enough to run on every frame as a live preview.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::geometry::{cosine_similarity, distance, path_length, Bounds, Point};

/// Spell symbols a skill can be bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureId {
    /// Straight stroke, horizontal or vertical.
    Line,
    /// Open stroke dipping down in the middle.
    VShape,
    /// Closed shape with corners.
    Triangle,
    /// Closed smooth shape, or an open cross.
    Circle,
}

impl GestureId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "LINE",
            Self::VShape => "V_SHAPE",
            Self::Triangle => "TRIANGLE",
            Self::Circle => "CIRCLE",
        }
    }
}

/// Fewer points than this never produce a rune.
pub const MIN_POINTS: usize = 8;
/// Number of sampling steps used for sharp-turn detection.
const TURN_SAMPLES: usize = 12;
/// Consecutive directions with a cosine below this count as a sharp turn (~66°).
const SHARP_TURN_COS: f32 = 0.4;
/// Closure: start/end gap relative to total path length.
const CLOSED_PATH_RATIO: f32 = 0.4;
/// Closure: start/end gap relative to the longer bounding-box side.
const CLOSED_EXTENT_RATIO: f32 = 0.5;
/// Open crosses read as CIRCLE when their aspect ratio lies in this range.
const CROSS_ASPECT: (f32, f32) = (0.6, 1.8);
const CROSS_MIN_TURNS: usize = 3;
/// The V dip must exceed this fraction of the height.
const V_DIP_RATIO: f32 = 0.25;
/// Lines are at least this many times longer than they are thick.
const LINE_ELONGATION: f32 = 2.2;

/// Intermediate measurements of a drawn path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RuneMetrics {
    pub bounds: Bounds,
    pub total_length: f32,
    pub start_end_distance: f32,
    pub is_closed: bool,
    pub sharp_turns: usize,
    /// Vertical drop of the path midpoint below the average of its endpoints.
    pub midpoint_dip: f32,
}

/// Measure `points`. `None` when there are fewer than [`MIN_POINTS`].
pub fn analyze(points: &[Point]) -> Option<RuneMetrics> {
    if points.len() < MIN_POINTS {
        return None;
    }
    let bounds = Bounds::of(points)?;
    let start = points[0];
    let end = points[points.len() - 1];

    let total_length = path_length(points);
    let start_end_distance = distance(start, end);
    let is_closed = start_end_distance < total_length * CLOSED_PATH_RATIO
        || start_end_distance < bounds.extent() * CLOSED_EXTENT_RATIO;

    let mid = points[points.len() / 2];
    let midpoint_dip = mid.y - (start.y + end.y) / 2.0;

    Some(RuneMetrics {
        bounds,
        total_length,
        start_end_distance,
        is_closed,
        sharp_turns: count_sharp_turns(points),
        midpoint_dip,
    })
}

fn count_sharp_turns(points: &[Point]) -> usize {
    let n = points.len();
    let step = (n / TURN_SAMPLES).max(1);

    (step..n.saturating_sub(step))
        .step_by(step)
        .filter(|&i| {
            let incoming = points[i] - points[i - step];
            let outgoing = points[i + step] - points[i];
            cosine_similarity(incoming, outgoing).is_some_and(|cos| cos < SHARP_TURN_COS)
        })
        .count()
}

/// Classify a flattened path. `None` means no rune.
///
/// Tests run in a fixed precedence: closed shapes, then the open cross,
/// then V, then line. A closed square therefore reads as TRIANGLE, since
/// anything closed with two or more corners does.
pub fn recognize(points: &[Point]) -> Option<GestureId> {
    let m = analyze(points)?;
    let width = m.bounds.width();
    let height = m.bounds.height();

    if m.is_closed {
        return Some(if m.sharp_turns >= 2 { GestureId::Triangle } else { GestureId::Circle });
    }

    let aspect = m.bounds.aspect_ratio();
    if m.sharp_turns >= CROSS_MIN_TURNS && aspect > CROSS_ASPECT.0 && aspect < CROSS_ASPECT.1 {
        return Some(GestureId::Circle);
    }

    if m.midpoint_dip > height * V_DIP_RATIO && m.sharp_turns >= 1 {
        return Some(GestureId::VShape);
    }

    if width > height * LINE_ELONGATION || height > width * LINE_ELONGATION {
        return Some(GestureId::Line);
    }

    None
}
