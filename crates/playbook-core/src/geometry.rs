//! Normalized board coordinates and the numeric helpers shared by the path
//! builder, hit testing and selection.
//!
//! Every persisted position is a fraction of the rendered surface, so the
//! same diagram renders identically at any pixel size or orientation.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A point in normalized board space (both axes in `[0, 1]`).
pub type Position = Point;

/// Angle between an arrowhead flank and the shaft.
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// Perpendicular displacement of a curved arrow's control point, relative to
/// the length of the segment.
pub const CURVE_BOW: f64 = 0.3;

/// Board orientation. Only rendered sizes depend on it, never stored geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Clamp a position componentwise to the unit square.
pub fn clamp_unit(p: Point) -> Point {
    Point::new(clamp01(p.x), clamp01(p.y))
}

fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Check that a position lies inside the unit square.
pub fn in_unit(p: Point) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}

/// Convert a normalized position to surface pixels.
pub fn to_surface(p: Point, size: Size) -> Point {
    Point::new(p.x * size.width, p.y * size.height)
}

/// Convert surface pixels to a normalized position (unclamped).
///
/// A zero-sized surface maps everything to the origin.
pub fn from_surface(p: Point, size: Size) -> Point {
    if size.width <= 0.0 || size.height <= 0.0 {
        return Point::ZERO;
    }
    Point::new(p.x / size.width, p.y / size.height)
}

/// The axis-aligned rectangle spanned by two corner points, in any order.
pub fn span_rect(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Inclusive containment: points on the boundary count as inside.
pub fn rect_contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline.
///
/// A single-point polyline degrades to point distance.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => (point - *only).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Direction angle (radians) of the vector from `from` to `to`.
pub fn angle_between(from: Point, to: Point) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// The two back corners of an arrowhead whose tip sits at `tip` and whose
/// shaft points along `angle`. Corners are `length` away from the tip, at
/// `±30°` from the reversed shaft direction.
pub fn arrow_head(tip: Point, angle: f64, length: f64) -> (Point, Point) {
    let corner = |offset: f64| {
        let a = angle + offset;
        Point::new(tip.x - length * a.cos(), tip.y - length * a.sin())
    };
    (corner(-ARROW_HEAD_ANGLE), corner(ARROW_HEAD_ANGLE))
}

/// Control point of a curved arrow: the midpoint pushed along the segment's
/// left-hand normal by [`CURVE_BOW`] of the segment vector.
pub fn curve_control(start: Point, end: Point) -> Point {
    let d = end - start;
    let normal = Vec2::new(-d.y, d.x);
    start.midpoint(end) + normal * CURVE_BOW
}

/// Direction angle (radians) of a quadratic Bézier's tangent at parameter `t`.
///
/// Falls back to the chord direction when the derivative vanishes.
pub fn quad_tangent_angle(start: Point, control: Point, end: Point, t: f64) -> f64 {
    let d = (control - start) * (2.0 * (1.0 - t)) + (end - control) * (2.0 * t);
    if d.hypot2() < f64::EPSILON {
        return angle_between(start, end);
    }
    d.y.atan2(d.x)
}

/// Sample a quadratic Bézier at `steps + 1` evenly spaced parameters.
pub fn sample_quad(start: Point, control: Point, end: Point, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let mt = 1.0 - t;
            let x = mt * mt * start.x + 2.0 * mt * t * control.x + t * t * end.x;
            let y = mt * mt * start.y + 2.0 * mt * t * control.y + t * t * end.y;
            Point::new(x, y)
        })
        .collect()
}

/// Sample a circle outline as a closed polyline.
pub fn sample_circle(center: Point, radius: f64, steps: usize) -> Vec<Point> {
    let steps = steps.max(3);
    (0..=steps)
        .map(|i| {
            let a = 2.0 * PI * i as f64 / steps as f64;
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}
