//! Layout cost: geometric conflicts, wire length, plane usage, board fit.
//!
//! Every pairwise scan rejects pairs whose bounding boxes are at least
//! `min_dist` apart before running the exact polygon clearance query. On
//! realistic boards almost all pairs are rejected this way.

use super::config::{EvaluationWeights, PcbConfig};
use crate::geometry::{distance_within, polygon_contains, Polygon};
use crate::layout::{Genome, Geometry, Pcb};
use std::borrow::Cow;

/// Cost contributed by each term. All fields are non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostBreakdown {
    pub node_node: f64,
    pub edge_edge: f64,
    pub node_edge: f64,
    pub component_component: f64,
    pub wire_length: f64,
    pub plane_usage: f64,
    pub out_of_bounds: f64,
}

impl CostBreakdown {
    /// Sum of the four pairwise conflict terms.
    pub fn conflicts(&self) -> f64 {
        self.node_node + self.edge_edge + self.node_edge + self.component_component
    }

    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.conflicts() + self.wire_length + self.plane_usage + self.out_of_bounds
    }
}

/// Scores layouts against a fixed board and weight set.
#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: EvaluationWeights,
    min_dist: f64,
    max_x: f64,
    max_y: f64,
    node_size: f64,
    edge_size: f64,
    fitness_exponent: f64,
    board: Polygon,
}

impl Evaluator {
    pub fn new(config: &PcbConfig) -> Self {
        Self {
            weights: config.evaluation_weights,
            min_dist: config.min_dist,
            max_x: config.max_x,
            max_y: config.max_y,
            node_size: config.node_size,
            edge_size: config.edge_size,
            fitness_exponent: config.fitness_exponent,
            board: Polygon::rectangle(0.0, 0.0, config.max_x, config.max_y),
        }
    }

    /// Per-term cost of `pcb`.
    ///
    /// Uses the cached geometry when grown; otherwise builds a temporary one.
    pub fn breakdown(&self, pcb: &Pcb) -> CostBreakdown {
        let geometry = match pcb.geometry() {
            Some(g) => Cow::Borrowed(g),
            None => Cow::Owned(pcb.genome().compute_geometry(self.node_size, self.edge_size)),
        };
        self.breakdown_with(pcb.genome(), &geometry)
    }

    /// Per-term cost of a genome against an explicit geometry.
    pub fn breakdown_with(&self, genome: &Genome, geometry: &Geometry) -> CostBreakdown {
        self.scan(genome, geometry, true)
    }

    /// Total cost; lower is better.
    pub fn cost(&self, pcb: &Pcb) -> f64 {
        self.breakdown(pcb).total()
    }

    /// Engine fitness: `-(cost ^ fitness_exponent)`; higher is better.
    pub fn fitness(&self, pcb: &Pcb) -> f64 {
        -self.cost(pcb).powf(self.fitness_exponent)
    }

    fn in_conflict(&self, a: &Polygon, b: &Polygon, prune: bool) -> bool {
        if prune && a.bounds().is_separated_from(b.bounds(), self.min_dist) {
            return false;
        }
        distance_within(a, b, self.min_dist) < self.min_dist
    }

    // The weights are defined per ordered pair: half weight for node/node and
    // wire/wire, full weight for component/component. Each unordered pair
    // scanned here stands for both orders. Node/wire pairs are visited once.
    fn scan(&self, genome: &Genome, geometry: &Geometry, prune: bool) -> CostBreakdown {
        let w = &self.weights;
        let mut cost = CostBreakdown::default();

        for i in 0..geometry.nodes.len() {
            for j in (i + 1)..geometry.nodes.len() {
                if genome.nodes[i].shares_component_with(&genome.nodes[j]) {
                    continue;
                }
                if self.in_conflict(&geometry.nodes[i], &geometry.nodes[j], prune) {
                    cost.node_node += 2.0 * (w.same_plane / 2.0);
                }
            }
        }

        for i in 0..geometry.edges.len() {
            for j in (i + 1)..geometry.edges.len() {
                if genome.are_adjacent(i, j) {
                    continue;
                }
                if self.in_conflict(&geometry.edges[i], &geometry.edges[j], prune) {
                    let weight = if genome.edges[i].plane == genome.edges[j].plane {
                        w.same_plane
                    } else {
                        w.different_plane
                    };
                    cost.edge_edge += 2.0 * (weight / 2.0);
                }
            }
        }

        for (n, node_shape) in geometry.nodes.iter().enumerate() {
            for (e, edge_shape) in geometry.edges.iter().enumerate() {
                if genome.is_node_on_edge(n, e) {
                    continue;
                }
                if self.in_conflict(node_shape, edge_shape, prune) {
                    cost.node_edge += w.same_plane;
                }
            }
        }

        for i in 0..geometry.components.len() {
            for j in (i + 1)..geometry.components.len() {
                if self.in_conflict(&geometry.components[i], &geometry.components[j], prune) {
                    cost.component_component += 2.0 * w.same_plane;
                }
            }
        }

        cost.wire_length = genome.total_wire_length() / (self.max_x + self.max_y) * w.edge_length;
        cost.plane_usage = genome.non_default_plane_edges() as f64 * w.non_zero_plane;
        cost.out_of_bounds = geometry
            .components
            .iter()
            .filter(|c| !polygon_contains(&self.board, c))
            .count() as f64
            * w.out_of_bounds;

        cost
    }
}
