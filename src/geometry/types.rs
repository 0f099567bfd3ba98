//! Point, polygon, and bounding-box types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the board plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Smallest box enclosing all `points`.
    ///
    /// Returns a degenerate box at the origin for an empty slice.
    pub fn from_points(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            };
        };

        points.iter().skip(1).fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    /// Returns `true` if the boxes are at least `min_dist` apart along the
    /// x or the y axis.
    ///
    /// When this holds, no point of one box lies closer than `min_dist` to
    /// any point of the other, so the shapes inside cannot conflict. The
    /// converse does not hold: overlapping boxes only mean an exact check is
    /// needed.
    pub fn is_separated_from(&self, other: &BoundingBox, min_dist: f64) -> bool {
        other.min_x - self.max_x >= min_dist
            || self.min_x - other.max_x >= min_dist
            || other.min_y - self.max_y >= min_dist
            || self.min_y - other.max_y >= min_dist
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A closed polygon with a cached bounding box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
    bounds: BoundingBox,
}

impl Polygon {
    /// Builds a polygon from its vertices in ring order.
    ///
    /// A trailing vertex equal to the first is dropped, so both open and
    /// explicitly closed rings are accepted.
    pub fn new(mut vertices: Vec<Point>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        let bounds = BoundingBox::from_points(&vertices);
        Self { vertices, bounds }
    }

    /// Axis-aligned rectangle spanning `(x1, y1)`–`(x2, y2)`.
    pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(vec![
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ])
    }

    /// Axis-aligned square of side `size` centered on `(cx, cy)`.
    pub fn square(cx: f64, cy: f64, size: f64) -> Self {
        let half = size / 2.0;
        Self::rectangle(cx - half, cy - half, cx + half, cy + half)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Iterates the ring's segments, including the closing one.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}
