// =============================================================================
// GEOMETRY.RS: Canvas-space primitives for rune drawing
//
// Everything the gesture pipeline measures about a drawn path:
// - Distances between canvas points (jitter filtering, closure tests)
// - Path length across a flattened stroke sequence
// - Bounding boxes (aspect ratio, size thresholds)
// - Direction similarity (sharp-turn detection)
// =============================================================================

use glam::Vec2;

/// A point in canvas pixel space. The y axis grows downward.
pub type Point = Vec2;

/// Calculate Euclidean distance between two canvas points.
#[inline]
pub fn distance(a: Point, b: Point) -> f32 {
    a.distance(b)
}

/// Sum of consecutive distances along `points`.
///
/// Stroke boundaries are not special: when strokes are flattened the gap
/// between the end of one and the start of the next counts as path.
pub fn path_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned bounding box of a point set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Bounding box of `points`, or `None` for an empty slice.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The longer of the two sides.
    #[inline]
    pub fn extent(&self) -> f32 {
        self.width().max(self.height())
    }

    /// `width / height`, with a zero height treated as 1 px.
    pub fn aspect_ratio(&self) -> f32 {
        let h = self.height();
        self.width() / if h == 0.0 { 1.0 } else { h }
    }
}

// =============================================================================
// DIRECTION HELPERS
// =============================================================================

/// Direction vectors shorter than this are treated as stationary noise.
pub const MIN_DIRECTION_LEN: f32 = 0.01;

/// Cosine of the angle between two direction vectors.
///
/// Returns `None` if either vector is shorter than [`MIN_DIRECTION_LEN`].
pub fn cosine_similarity(v1: Vec2, v2: Vec2) -> Option<f32> {
    let m1 = v1.length();
    let m2 = v2.length();
    if m1 < MIN_DIRECTION_LEN || m2 < MIN_DIRECTION_LEN {
        return None;
    }
    Some(v1.dot(v2) / (m1 * m2))
}
