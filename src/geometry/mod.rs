//! Planar geometry primitives.
//!
//! Closed polygons, axis-aligned bounding boxes, rotation, containment, and
//! the polygon-to-polygon clearance query used by the fitness evaluator.
//!
//! Polygons are stored as an open vertex list; the closing segment from the
//! last vertex back to the first is implicit.
//!
//! # Key Functions
//!
//! - [`point_in_polygon`]: ray-casting test, boundary counts as inside
//! - [`polygon_contains`]: every vertex of one polygon inside another
//! - [`distance_within`]: clearance query with an early-exit tolerance
//! - [`rotate_point`]: rotation about a pivot, angle in degrees

mod distance;
mod rotation;
mod types;

pub use distance::{
    distance, distance_within, point_in_polygon, point_segment_distance, polygon_contains,
    segment_distance, segments_intersect,
};
pub use rotation::rotate_point;
pub use types::{BoundingBox, Point, Polygon};
