/// Rune recognition over synthetic strokes.
///
/// Shapes are built as polylines with evenly spaced samples per edge, the
/// way a steady hand at camera frame rate would produce them.
use runecast::geometry::Point;
use runecast::gesture::{analyze, recognize, GestureId};

/// `per_edge` samples along each edge, plus the final vertex.
fn polyline(vertices: &[(f32, f32)], per_edge: usize) -> Vec<Point> {
    let mut out = Vec::new();
    for pair in vertices.windows(2) {
        let a = Point::new(pair[0].0, pair[0].1);
        let b = Point::new(pair[1].0, pair[1].1);
        for k in 0..per_edge {
            out.push(a.lerp(b, k as f32 / per_edge as f32));
        }
    }
    if let Some(&(x, y)) = vertices.last() {
        out.push(Point::new(x, y));
    }
    out
}

fn circle(radius: f32) -> Vec<Point> {
    (0..=36)
        .map(|i| {
            let a = (i as f32 * 10.0).to_radians();
            Point::new(200.0 + radius * a.cos(), 200.0 + radius * a.sin())
        })
        .collect()
}

// ── Shapes ───────────────────────────────────────────────────────────────────

#[test]
fn closed_triangle_is_triangle() {
    let pts = polyline(&[(0.0, 100.0), (50.0, 0.0), (100.0, 100.0), (0.0, 100.0)], 10);
    assert_eq!(pts.len(), 31);
    assert_eq!(recognize(&pts), Some(GestureId::Triangle));
}

#[test]
fn closed_circle_is_circle() {
    assert_eq!(recognize(&circle(100.0)), Some(GestureId::Circle));
}

/// Any closed shape with two or more corners reads as a triangle,
/// squares included.
#[test]
fn closed_square_reads_as_triangle() {
    let pts = polyline(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)], 12);
    assert_eq!(pts.len(), 49);
    assert_eq!(recognize(&pts), Some(GestureId::Triangle));
}

#[test]
fn slightly_wobbly_horizontal_line_is_line() {
    let pts: Vec<Point> = (0..20)
        .map(|i| Point::new(i as f32 * 10.0, if i % 2 == 0 { 0.0 } else { 2.0 }))
        .collect();
    assert_eq!(recognize(&pts), Some(GestureId::Line));
}

#[test]
fn vertical_line_is_line() {
    let pts: Vec<Point> = (0..15).map(|i| Point::new(50.0, i as f32 * 12.0)).collect();
    assert_eq!(recognize(&pts), Some(GestureId::Line));
}

#[test]
fn open_v_is_v_shape() {
    let pts = polyline(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)], 10);
    assert_eq!(recognize(&pts), Some(GestureId::VShape));
}

#[test]
fn inverted_v_is_not_v_shape() {
    let pts = polyline(&[(0.0, 100.0), (50.0, 0.0), (100.0, 100.0)], 10);
    assert_ne!(recognize(&pts), Some(GestureId::VShape));
}

#[test]
fn open_corner_without_dip_is_none() {
    let pts = polyline(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)], 10);
    assert_eq!(recognize(&pts), None);
}

// ── Edge cases ───────────────────────────────────────────────────────────────

#[test]
fn fewer_than_eight_points_is_none() {
    let pts: Vec<Point> = (0..7).map(|i| Point::new(i as f32 * 30.0, 0.0)).collect();
    assert_eq!(recognize(&pts), None);
    assert!(analyze(&pts).is_none());
}

#[test]
fn empty_path_is_none() {
    assert_eq!(recognize(&[]), None);
}

#[test]
fn stationary_path_does_not_panic() {
    let pts = vec![Point::new(10.0, 10.0); 20];
    // Zero-length path: nothing to close, no measurable turns or extent.
    assert_eq!(recognize(&pts), None);
}

#[test]
fn recognition_is_deterministic() {
    let pts = polyline(&[(0.0, 100.0), (50.0, 0.0), (100.0, 100.0), (0.0, 100.0)], 10);
    let first = recognize(&pts);
    for _ in 0..5 {
        assert_eq!(recognize(&pts), first);
    }
}

// ── Metrics ──────────────────────────────────────────────────────────────────

#[test]
fn analyze_reports_triangle_measurements() {
    let pts = polyline(&[(0.0, 100.0), (50.0, 0.0), (100.0, 100.0), (0.0, 100.0)], 10);
    let m = analyze(&pts).expect("enough points");
    assert!(m.is_closed);
    assert_eq!(m.sharp_turns, 2);
    assert!((m.bounds.width() - 100.0).abs() < 1e-3);
    assert!((m.bounds.height() - 100.0).abs() < 1e-3);
    assert!(m.start_end_distance < 1e-3);
    // Two slanted edges of length sqrt(50² + 100²) plus the 100 px base.
    let expected = 2.0 * (50.0_f32.powi(2) + 100.0_f32.powi(2)).sqrt() + 100.0;
    assert!((m.total_length - expected).abs() < 0.1, "got {}", m.total_length);
}

#[test]
fn analyze_reports_open_v() {
    let pts = polyline(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)], 10);
    let m = analyze(&pts).expect("enough points");
    assert!(!m.is_closed);
    assert_eq!(m.sharp_turns, 1);
    assert!((m.midpoint_dip - 100.0).abs() < 1e-3);
}
