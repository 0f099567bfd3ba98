//! Connected components of a net's wiring graph.

use super::genome::Genome;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Groups the nodes of `net` into connected components using the net's
/// edges, optionally ignoring the edge at index `skip_edge`.
///
/// Each group lists genome node indices in net order. Groups appear in
/// order of their first node's position in the net, so the result is
/// deterministic. Edges whose endpoints are not members of the net are
/// ignored.
pub fn net_components(genome: &Genome, net: usize, skip_edge: Option<usize>) -> Vec<Vec<usize>> {
    let Some(members) = genome.nets.get(net).map(|n| &n.nodes) else {
        return Vec::new();
    };

    let mut graph: UnGraph<usize, ()> = UnGraph::with_capacity(members.len(), members.len());
    let local: HashMap<usize, NodeIndex> = members
        .iter()
        .map(|&node| (node, graph.add_node(node)))
        .collect();

    for (i, edge) in genome.edges.iter().enumerate() {
        if Some(i) == skip_edge || edge.net != net {
            continue;
        }
        if let (Some(&a), Some(&b)) = (local.get(&edge.from), local.get(&edge.to)) {
            graph.add_edge(a, b, ());
        }
    }

    // Graph indices follow net order; sort to make the grouping stable.
    let mut groups: Vec<Vec<usize>> = kosaraju_scc(&graph)
        .into_iter()
        .map(|component| {
            let mut positions: Vec<usize> = component.iter().map(|idx| idx.index()).collect();
            positions.sort_unstable();
            positions
        })
        .collect();
    groups.sort_unstable_by_key(|positions| positions[0]);

    groups
        .into_iter()
        .map(|positions| positions.into_iter().map(|p| graph[NodeIndex::new(p)]).collect())
        .collect()
}

/// Returns `true` if every node of `net` is reachable from every other.
///
/// Empty and single-node nets are trivially connected.
pub fn is_net_connected(genome: &Genome, net: usize) -> bool {
    net_components(genome, net, None).len() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Edge, Net, Node};

    fn chain_genome() -> Genome {
        Genome {
            nodes: (0..5).map(|i| Node::free(i as f64 * 10.0, 0.0)).collect(),
            edges: vec![Edge::new(0, 1, 0), Edge::new(1, 2, 0), Edge::new(3, 4, 1)],
            nets: vec![Net::new(vec![0, 1, 2]), Net::new(vec![3, 4])],
            components: vec![],
        }
    }

    #[test]
    fn test_connected_nets() {
        let g = chain_genome();
        assert!(is_net_connected(&g, 0));
        assert!(is_net_connected(&g, 1));
    }

    #[test]
    fn test_skip_edge_splits_net() {
        let g = chain_genome();
        let groups = net_components(&g, 0, Some(0));
        assert_eq!(groups, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_missing_wire_detected() {
        let mut g = chain_genome();
        g.edges.remove(1);
        assert!(!is_net_connected(&g, 0));
        assert_eq!(net_components(&g, 0, None).len(), 2);
    }

    #[test]
    fn test_unknown_net() {
        let g = chain_genome();
        assert!(net_components(&g, 9, None).is_empty());
    }

    #[test]
    fn test_groups_follow_net_order() {
        let g = Genome {
            nodes: (0..6).map(|i| Node::free(i as f64, 0.0)).collect(),
            edges: vec![Edge::new(5, 0, 0), Edge::new(3, 1, 0)],
            nets: vec![Net::new(vec![4, 3, 5, 1, 0])],
            components: vec![],
        };
        assert_eq!(
            net_components(&g, 0, None),
            vec![vec![4], vec![3, 1], vec![5, 0]]
        );
    }

    #[test]
    fn test_skipping_only_wire_splits_pair() {
        let g = chain_genome();
        let groups = net_components(&g, 1, Some(2));
        assert_eq!(groups, vec![vec![3], vec![4]]);
    }
}
