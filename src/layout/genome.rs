//! The layout genome and its structural operations.

use super::connectivity::is_net_connected;
use super::geometry::Geometry;
use super::types::{Component, Edge, Net, Node};
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Slack allowed between a pin node and its computed placement.
const PLACEMENT_TOLERANCE: f64 = 1e-6;

/// A complete candidate layout.
///
/// The genome owns all of its storage, so [`Clone`] is a full deep copy:
/// a cloned genome shares nothing with the original and can be mutated
/// freely without affecting parents.
///
/// A genome is self-consistent when every component's pins are placed
/// (see [`place`](Genome::place)) and every net is connected.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Genome {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub nets: Vec<Net>,
    pub components: Vec<Component>,
}

impl Genome {
    /// Recomputes every pin node from its component's center and rotation.
    ///
    /// Idempotent: placing twice without other changes leaves node positions
    /// unchanged.
    pub fn place(&mut self) {
        for index in 0..self.components.len() {
            self.place_component(index);
        }
    }

    /// Recomputes the pin nodes of a single component.
    pub fn place_component(&mut self, index: usize) {
        let Some(component) = self.components.get(index) else {
            return;
        };
        for pin in &component.pins {
            let (x, y) = component.pin_position(pin);
            if let Some(node) = self.nodes.get_mut(pin.node) {
                node.x = x;
                node.y = y;
            }
        }
    }

    /// Sorts edges by `(net, from, to)` so each net's edges are contiguous.
    pub fn sort_edges(&mut self) {
        self.edges.sort_by_key(Edge::sort_key);
    }

    /// Drops every edge belonging to `net`, keeping the rest in order.
    pub fn remove_net_edges(&mut self, net: usize) {
        self.edges.retain(|e| e.net != net);
    }

    /// Replaces the wiring of `net` with a fresh random spanning tree.
    ///
    /// The net's nodes are shuffled; every node after the first is wired to
    /// a uniformly chosen node earlier in the shuffle. The result is
    /// connected and touches every node of the net. New edges sit on the
    /// default plane. Edges are re-sorted afterwards.
    pub fn regenerate_net<R: Rng>(&mut self, net: usize, rng: &mut R) {
        let Some(members) = self.nets.get(net) else {
            return;
        };
        let mut shuffled = members.nodes.clone();
        shuffled.shuffle(rng);

        self.remove_net_edges(net);
        for i in 1..shuffled.len() {
            let to = shuffled[rng.random_range(0..i)];
            self.edges.push(Edge::new(shuffled[i], to, net));
        }
        self.sort_edges();
    }

    /// Index range of `net`'s edges.
    ///
    /// Requires edges sorted by net (see [`sort_edges`](Genome::sort_edges)).
    pub fn net_edge_range(&self, net: usize) -> Range<usize> {
        let start = self.edges.partition_point(|e| e.net < net);
        let end = self.edges.partition_point(|e| e.net <= net);
        start..end
    }

    /// Edges `e1` and `e2` share an endpoint.
    pub fn are_adjacent(&self, e1: usize, e2: usize) -> bool {
        self.edges[e1].is_adjacent_to(&self.edges[e2])
    }

    /// `node` is an endpoint of edge `edge`.
    pub fn is_node_on_edge(&self, node: usize, edge: usize) -> bool {
        self.edges[edge].touches(node)
    }

    /// Euclidean length of edge `edge`.
    pub fn edge_length(&self, edge: usize) -> f64 {
        let e = &self.edges[edge];
        self.nodes[e.from].position().distance_to(self.nodes[e.to].position())
    }

    /// Sum of all wire lengths.
    pub fn total_wire_length(&self) -> f64 {
        (0..self.edges.len()).map(|i| self.edge_length(i)).sum()
    }

    /// Number of edges routed off the default plane.
    pub fn non_default_plane_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.plane != 0).count()
    }

    /// Builds the derived polygon view. Never mutates the genome.
    pub fn compute_geometry(&self, node_size: f64, edge_size: f64) -> Geometry {
        Geometry::from_genome(self, node_size, edge_size)
    }

    /// Checks the structural invariants expected of a genome handed in from
    /// outside the engine.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGenome`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let n_nodes = self.nodes.len();
        let invalid = |msg: String| Err(Error::InvalidGenome(msg));

        for (ni, net) in self.nets.iter().enumerate() {
            if let Some(&bad) = net.nodes.iter().find(|&&n| n >= n_nodes) {
                return invalid(format!("net {ni} references missing node {bad}"));
            }
        }

        for (ei, edge) in self.edges.iter().enumerate() {
            if edge.from >= n_nodes || edge.to >= n_nodes {
                return invalid(format!("edge {ei} references a missing node"));
            }
            let Some(net) = self.nets.get(edge.net) else {
                return invalid(format!("edge {ei} references missing net {}", edge.net));
            };
            if !net.contains(edge.from) || !net.contains(edge.to) {
                return invalid(format!(
                    "edge {ei} ({} -> {}) leaves net {}",
                    edge.from, edge.to, edge.net
                ));
            }
        }

        for ni in 0..self.nets.len() {
            if !is_net_connected(self, ni) {
                return invalid(format!("net {ni} is not connected"));
            }
        }

        for (ci, component) in self.components.iter().enumerate() {
            for pin in &component.pins {
                let Some(node) = self.nodes.get(pin.node) else {
                    return invalid(format!("component {ci} pin references missing node {}", pin.node));
                };
                if node.component != Some(ci) {
                    return invalid(format!("node {} is a pin of component {ci} but not owned by it", pin.node));
                }
                let (x, y) = component.pin_position(pin);
                if (node.x - x).abs() > PLACEMENT_TOLERANCE || (node.y - y).abs() > PLACEMENT_TOLERANCE {
                    return invalid(format!("pin node {} of component {ci} is not placed", pin.node));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::connectivity::net_components;
    use crate::layout::testing::{random_board, two_resistor_board};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixture_is_valid() {
        assert!(two_resistor_board().validate().is_ok());
    }

    #[test]
    fn test_place_is_idempotent() {
        let mut g = two_resistor_board();
        g.components[0].rotation = 37.0;
        g.components[1].cx += 12.5;

        g.place();
        let once = g.nodes.clone();
        g.place();
        assert_eq!(once, g.nodes);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_unplaced_pin_rejected() {
        let mut g = two_resistor_board();
        g.components[0].rotation = 90.0;
        assert!(matches!(g.validate(), Err(Error::InvalidGenome(_))));
    }

    #[test]
    fn test_edge_leaving_net_rejected() {
        let mut g = two_resistor_board();
        g.edges[0].to = 3;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_regenerate_net_spans_all_nodes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut g = Genome {
            nodes: (0..6).map(|i| Node::free(i as f64, 0.0)).collect(),
            edges: vec![],
            nets: vec![Net::new(vec![0, 2, 4]), Net::new(vec![1, 3, 5])],
            components: vec![],
        };

        for _ in 0..50 {
            g.regenerate_net(0, &mut rng);
            g.regenerate_net(1, &mut rng);

            assert_eq!(g.edges.len(), 4);
            assert_eq!(net_components(&g, 0, None).len(), 1);
            assert_eq!(net_components(&g, 1, None).len(), 1);
            assert!(g.edges.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()));
        }
    }

    #[test]
    fn test_regenerate_keeps_other_nets() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = two_resistor_board();
        let before: Vec<Edge> = g.edges.iter().filter(|e| e.net == 1).copied().collect();

        g.regenerate_net(0, &mut rng);

        let after: Vec<Edge> = g.edges.iter().filter(|e| e.net == 1).copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_net_edge_range() {
        let g = two_resistor_board();
        let r0 = g.net_edge_range(0);
        let r1 = g.net_edge_range(1);
        assert_eq!(r0.end, r1.start);
        assert!(g.edges[r0].iter().all(|e| e.net == 0));
        assert!(g.net_edge_range(7).is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = two_resistor_board();
        let mut copy = original.clone();
        copy.nodes[0].x += 100.0;
        copy.components[0].pins[0].dx = 0.0;
        copy.nets[0].nodes.clear();

        assert_ne!(original.nodes[0], copy.nodes[0]);
        assert_ne!(original.components[0].pins[0], copy.components[0].pins[0]);
        assert!(!original.nets[0].nodes.is_empty());
    }

    #[test]
    fn test_wire_length_and_planes() {
        let mut g = Genome {
            nodes: vec![Node::free(0.0, 0.0), Node::free(3.0, 4.0), Node::free(3.0, 0.0)],
            edges: vec![Edge::new(0, 1, 0), Edge::new(1, 2, 0)],
            nets: vec![Net::new(vec![0, 1, 2])],
            components: vec![],
        };
        g.edges[1].plane = 1;

        assert!((g.total_wire_length() - 9.0).abs() < 1e-12);
        assert_eq!(g.non_default_plane_edges(), 1);
    }

    proptest! {
        #[test]
        fn prop_place_idempotent(seed in any::<u64>(), rotation in 0.0..360.0f64) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut g = random_board(&mut rng, 6, 3, 300.0, 300.0);
            for c in &mut g.components {
                c.rotation = rotation;
            }

            g.place();
            let first = g.nodes.clone();
            g.place();
            prop_assert_eq!(first, g.nodes.clone());
            prop_assert!(g.validate().is_ok());
        }
    }
}
