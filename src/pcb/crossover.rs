//! Uniform crossover over placements and nets.
//!
//! Both parents must describe the same board: equal node, net, and
//! component lists that differ only in placement and wiring. The child
//! inherits each component (center, rotation, and pin nodes) from one
//! parent, and each net's complete wiring from one parent. Nets are never
//! mixed, so every net that is connected in both parents stays connected.

use crate::layout::Genome;
use rand::Rng;

/// Builds one child from two parents with a fair coin per component and
/// per net.
///
/// Freestanding nodes follow the wiring of the net they belong to.
///
/// # Complexity
/// O(nodes + edges + components).
pub fn crossover<R: Rng>(a: &Genome, b: &Genome, rng: &mut R) -> Genome {
    debug_assert_eq!(a.nodes.len(), b.nodes.len(), "parents differ in nodes");
    debug_assert_eq!(a.nets.len(), b.nets.len(), "parents differ in nets");
    debug_assert_eq!(a.components.len(), b.components.len(), "parents differ in components");

    let mut child = a.clone();

    for (ci, donor) in b.components.iter().enumerate() {
        if rng.random_bool(0.5) {
            continue;
        }
        for pin in &donor.pins {
            child.nodes[pin.node] = b.nodes[pin.node];
        }
        child.components[ci] = donor.clone();
    }

    child.edges.clear();
    for (net, members) in a.nets.iter().enumerate() {
        let take_b = rng.random_bool(0.5);
        let parent = if take_b { b } else { a };
        child
            .edges
            .extend_from_slice(&parent.edges[parent.net_edge_range(net)]);
        if take_b {
            for &node in &members.nodes {
                if b.nodes[node].component.is_none() {
                    child.nodes[node] = b.nodes[node];
                }
            }
        }
    }

    child
}
