//! Genome building blocks: nodes, edges, nets, and components.

use crate::geometry::{rotate_point, BoundingBox, Point, Polygon};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slack allowed when checking that a shape sits on the board.
const FIT_EPSILON: f64 = 1e-9;

/// A routing point on the board.
///
/// Pin nodes carry the index of the [`Component`] that owns them;
/// freestanding routing points carry `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub component: Option<usize>,
}

impl Node {
    /// A node not owned by any component.
    pub fn free(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            component: None,
        }
    }

    /// A pin node owned by `component`.
    pub fn pin(x: f64, y: f64, component: usize) -> Self {
        Self {
            x,
            y,
            component: Some(component),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Two nodes may conflict only if they are not pins of the same component.
    pub fn shares_component_with(&self, other: &Node) -> bool {
        matches!((self.component, other.component), (Some(a), Some(b)) if a == b)
    }
}

/// A wire between two nodes of the same net on one routing plane.
///
/// Plane `0` is the default layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub net: usize,
    pub plane: u32,
}

impl Edge {
    /// A wire on the default plane.
    pub fn new(from: usize, to: usize, net: usize) -> Self {
        Self {
            from,
            to,
            net,
            plane: 0,
        }
    }

    pub fn touches(&self, node: usize) -> bool {
        self.from == node || self.to == node
    }

    /// Edges are adjacent when they share an endpoint.
    pub fn is_adjacent_to(&self, other: &Edge) -> bool {
        self.touches(other.from) || self.touches(other.to)
    }

    /// Ordering key that keeps a net's edges contiguous.
    pub fn sort_key(&self) -> (usize, usize, usize) {
        (self.net, self.from, self.to)
    }
}

/// A set of nodes that must stay mutually connected by wires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Net {
    pub nodes: Vec<usize>,
}

impl Net {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }
}

/// A pin offset relative to its component's local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentPin {
    /// Index of the genome node this pin drives.
    pub node: usize,
    pub dx: f64,
    pub dy: f64,
}

/// A placed footprint: pin offsets, local outline, and placement state.
///
/// The outline `(x1, y1)`–`(x2, y2)` is relative to the center and need not
/// be symmetric. Rotation is in degrees about the center.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    pub pins: Vec<ComponentPin>,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub cx: f64,
    pub cy: f64,
    pub rotation: f64,
}

impl Component {
    /// An unplaced component at the origin with no rotation.
    pub fn new(pins: Vec<ComponentPin>, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            pins,
            x1,
            y1,
            x2,
            y2,
            cx: 0.0,
            cy: 0.0,
            rotation: 0.0,
        }
    }

    /// Board position of `pin` under the current placement.
    pub fn pin_position(&self, pin: &ComponentPin) -> (f64, f64) {
        rotate_point(
            self.cx + pin.dx,
            self.cy + pin.dy,
            self.cx,
            self.cy,
            self.rotation,
        )
    }

    fn local_corners(&self) -> [(f64, f64); 4] {
        [
            (self.x1, self.y1),
            (self.x2, self.y1),
            (self.x2, self.y2),
            (self.x1, self.y2),
        ]
    }

    /// Outline on the board, rotated about the center.
    pub fn outline(&self) -> Polygon {
        Polygon::new(
            self.local_corners()
                .iter()
                .map(|&(x, y)| {
                    let (rx, ry) =
                        rotate_point(self.cx + x, self.cy + y, self.cx, self.cy, self.rotation);
                    Point::new(rx, ry)
                })
                .collect(),
        )
    }

    /// Bounding box of the rotated outline, relative to the center.
    pub fn rotated_extents(&self) -> BoundingBox {
        let corners: Vec<Point> = self
            .local_corners()
            .iter()
            .map(|&(x, y)| {
                let (rx, ry) = rotate_point(x, y, 0.0, 0.0, self.rotation);
                Point::new(rx, ry)
            })
            .collect();
        BoundingBox::from_points(&corners)
    }

    /// Returns `true` if the rotated outline lies within `[0, max_x] x [0, max_y]`.
    pub fn fits_within(&self, max_x: f64, max_y: f64) -> bool {
        let ext = self.rotated_extents();
        self.cx + ext.min_x >= -FIT_EPSILON
            && self.cy + ext.min_y >= -FIT_EPSILON
            && self.cx + ext.max_x <= max_x + FIT_EPSILON
            && self.cy + ext.max_y <= max_y + FIT_EPSILON
    }

    /// Samples a center keeping the rotated outline on the board.
    ///
    /// Uses the current rotation and accounts for asymmetric outlines. When
    /// the component is larger than the board along an axis, that axis is
    /// centered instead.
    pub fn random_position_within_bounds<R: Rng>(
        &self,
        max_x: f64,
        max_y: f64,
        rng: &mut R,
    ) -> (f64, f64) {
        let ext = self.rotated_extents();
        let sample = |lo: f64, hi: f64, rng: &mut R| {
            if hi > lo {
                rng.random_range(lo..=hi)
            } else {
                if hi < lo {
                    tracing::warn!(lo, hi, "component does not fit on the board");
                }
                (lo + hi) / 2.0
            }
        };

        let cx = sample(-ext.min_x, max_x - ext.max_x, rng);
        let cy = sample(-ext.min_y, max_y - ext.max_y, rng);
        (cx, cy)
    }
}
