//! Containment and clearance queries over closed polygons.
//!
//! [`distance_within`] is the workhorse behind every pairwise conflict check
//! in the evaluator. It returns `0.0` as soon as it can prove the polygons
//! touch, overlap, or come closer than the caller's tolerance, and only
//! computes a true minimum distance when no such proof exists.

use super::types::{Point, Polygon};

/// Tolerance for collinearity in the orientation predicate.
const EPSILON: f64 = 1e-12;

/// Sign of the cross product `(b - a) x (c - a)`.
fn orientation(a: Point, b: Point, c: Point) -> i8 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > EPSILON {
        1
    } else if cross < -EPSILON {
        -1
    } else {
        0
    }
}

/// `p` lies on segment `a`–`b`, given that the three points are collinear.
fn within_segment_box(p: Point, a: Point, b: Point) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    orientation(a, b, p) == 0 && within_segment_box(p, a, b)
}

/// Returns `true` if segments `a1`–`a2` and `b1`–`b2` share at least one point.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == 0 && within_segment_box(b1, a1, a2))
        || (o2 == 0 && within_segment_box(b2, a1, a2))
        || (o3 == 0 && within_segment_box(a1, b1, b2))
        || (o4 == 0 && within_segment_box(a2, b1, b2))
}

/// Distance from `p` to the closest point of segment `a`–`b`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Minimum distance between two segments; `0.0` if they intersect.
pub fn segment_distance(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    if segments_intersect(a1, a2, b1, b2) {
        return 0.0;
    }

    point_segment_distance(a1, b1, b2)
        .min(point_segment_distance(a2, b1, b2))
        .min(point_segment_distance(b1, a1, a2))
        .min(point_segment_distance(b2, a1, a2))
}

/// Ray-casting point-in-polygon test.
///
/// Points on the boundary are considered inside.
pub fn point_in_polygon(point: Point, polygon: &Polygon) -> bool {
    let mut inside = false;

    for (a, b) in polygon.segments() {
        if on_segment(point, a, b) {
            return true;
        }
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }

    inside
}

/// Returns `true` if every vertex of `inner` lies inside `outer`.
///
/// Exact for convex `outer`, which covers the board rectangle it is used
/// against.
pub fn polygon_contains(outer: &Polygon, inner: &Polygon) -> bool {
    inner
        .vertices()
        .iter()
        .all(|&p| point_in_polygon(p, outer))
}

fn any_vertex_inside(a: &Polygon, b: &Polygon) -> bool {
    a.vertices().iter().any(|&p| point_in_polygon(p, b))
}

/// Clearance between two polygons with an early-exit tolerance.
///
/// Returns `0.0` if a vertex of either polygon lies inside the other, or if
/// any pair of boundary segments is closer than `tolerance`. Otherwise
/// returns the minimum segment-to-segment distance.
///
/// Callers that only need the verdict "closer than `d`" pass `d` as the
/// tolerance; the verdict `distance_within(a, b, d) < d` is the same as for
/// the exact distance, but most conflicting pairs exit on the first close
/// segment pair.
///
/// # Complexity
/// O(n·m) segment pairs in the worst case.
pub fn distance_within(a: &Polygon, b: &Polygon, tolerance: f64) -> f64 {
    if a.vertices().is_empty() || b.vertices().is_empty() {
        return f64::INFINITY;
    }

    if any_vertex_inside(a, b) || any_vertex_inside(b, a) {
        return 0.0;
    }

    let mut min = f64::INFINITY;
    for (a1, a2) in a.segments() {
        for (b1, b2) in b.segments() {
            let d = segment_distance(a1, a2, b1, b2);
            if d == 0.0 || d < tolerance {
                return 0.0;
            }
            min = min.min(d);
        }
    }
    min
}

/// Exact minimum distance between two polygons; `0.0` when they overlap.
pub fn distance(a: &Polygon, b: &Polygon) -> f64 {
    distance_within(a, b, 0.0)
}
