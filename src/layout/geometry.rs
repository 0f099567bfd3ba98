//! Derived collision shapes of a genome.

use super::genome::Genome;
use super::types::Node;
use crate::geometry::{Point, Polygon};

/// One polygon per node, edge, and component of a genome.
///
/// Geometry is a disposable view: it is rebuilt from the genome whenever
/// needed and never edited directly. Index `i` in each list corresponds to
/// index `i` in the genome's list of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub nodes: Vec<Polygon>,
    pub edges: Vec<Polygon>,
    pub components: Vec<Polygon>,
}

impl Geometry {
    pub(crate) fn from_genome(genome: &Genome, node_size: f64, edge_size: f64) -> Self {
        Self {
            nodes: genome
                .nodes
                .iter()
                .map(|n| Polygon::square(n.x, n.y, node_size))
                .collect(),
            edges: genome
                .edges
                .iter()
                .map(|e| wire_shape(&genome.nodes[e.from], &genome.nodes[e.to], edge_size))
                .collect(),
            components: genome.components.iter().map(|c| c.outline()).collect(),
        }
    }
}

/// Rectangle of width `edge_size` running from `from` to `to`.
///
/// A zero-length wire has no direction to offset along, so it becomes a
/// square of side `edge_size` on the shared point.
fn wire_shape(from: &Node, to: &Node, edge_size: f64) -> Polygon {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return Polygon::square(from.x, from.y, edge_size);
    }

    let half = edge_size / 2.0;
    let (ox, oy) = (-dy / len * half, dx / len * half);

    Polygon::new(vec![
        Point::new(from.x - ox, from.y - oy),
        Point::new(to.x - ox, to.y - oy),
        Point::new(to.x + ox, to.y + oy),
        Point::new(from.x + ox, from.y + oy),
    ])
}
