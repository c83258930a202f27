use crate::geometry::{distance, Point};

/// Default minimum spacing between consecutive stroke points, in pixels.
pub const DEFAULT_JITTER_PX: f32 = 5.0;

/// Accumulates pen positions into the strokes of one casting attempt.
///
/// The canvas is shared: every pointing hand writes into the same active
/// stroke, there is no per-hand separation.
#[derive(Clone, Debug)]
pub struct StrokeCapture {
    strokes: Vec<Vec<Point>>,
    drawing: bool,
    jitter_px: f32,
}

impl StrokeCapture {
    pub fn new(jitter_px: f32) -> Self {
        Self { strokes: Vec::new(), drawing: false, jitter_px }
    }

    /// Pen down or pen move.
    ///
    /// Starts a new stroke if the pen is up. Otherwise appends `point` to the
    /// active stroke, unless it lies within the jitter threshold of the
    /// stroke's last point.
    pub fn begin_or_continue(&mut self, point: Point) {
        if !self.drawing {
            self.strokes.push(vec![point]);
            self.drawing = true;
            return;
        }

        match self.strokes.last_mut() {
            Some(stroke) => {
                let keep = stroke
                    .last()
                    .map_or(true, |&last| distance(last, point) > self.jitter_px);
                if keep {
                    stroke.push(point);
                }
            }
            None => self.strokes.push(vec![point]),
        }
    }

    /// Lift the pen without erasing anything.
    pub fn pause(&mut self) {
        self.drawing = false;
    }

    /// Erase the whole path set and lift the pen.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }

    /// All points of all strokes, in capture order.
    pub fn flatten(&self) -> Vec<Point> {
        self.strokes.iter().flatten().copied().collect()
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// True when no stroke has been started since the last clear.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Vec::len).sum()
    }

    pub fn jitter_px(&self) -> f32 {
        self.jitter_px
    }
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_PX)
    }
}
