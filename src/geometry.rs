//! Pure geometry helpers shared by the shape model and the hit-tester.

use kurbo::{Point, Rect};

/// Half-extent, per axis, of the square region around a handle that counts
/// as touching it.
pub const HANDLE_TOLERANCE: f64 = 5.0;

/// Slack allowed by the collinearity test for points on a line segment.
const LINE_TOLERANCE: f64 = 1.0;

/// Whether `p` lies within [`HANDLE_TOLERANCE`] of `target` in both axes.
pub fn near_point(p: Point, target: Point) -> bool {
    (p.x - target.x).abs() < HANDLE_TOLERANCE && (p.y - target.y).abs() < HANDLE_TOLERANCE
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Whether `p` lies inside `rect`, borders included.
pub fn in_box(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Whether `p` lies on the segment a-b: the detour through `p` must be
/// shorter than [`LINE_TOLERANCE`].
pub fn on_segment(p: Point, a: Point, b: Point) -> bool {
    (distance(a, p) + distance(p, b) - distance(a, b)).abs() < LINE_TOLERANCE
}

/// Whether `p` lies inside the ellipse inscribed in `rect`.
///
/// A degenerate rect (zero width or height) contains nothing.
pub fn in_inscribed_ellipse(rect: Rect, p: Point) -> bool {
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    if rx < f64::EPSILON || ry < f64::EPSILON {
        return false;
    }
    let center = rect.center();
    let dx = (p.x - center.x) / rx;
    let dy = (p.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Whether `p` lies inside the diamond inscribed in `rect` (vertices at the
/// edge midpoints), via the taxicab-normalized diamond equation.
///
/// A degenerate rect contains nothing.
pub fn in_inscribed_diamond(rect: Rect, p: Point) -> bool {
    let half_w = rect.width() / 2.0;
    let half_h = rect.height() / 2.0;
    if half_w < f64::EPSILON || half_h < f64::EPSILON {
        return false;
    }
    let center = rect.center();
    (p.x - center.x).abs() / half_w + (p.y - center.y).abs() / half_h <= 1.0
}
