//! Layout mutations and their weighted dispatch.
//!
//! Every mutation edits the genome in place and leaves it self-consistent:
//! moved components have their pins re-placed, and rewired nets stay
//! connected with edges sorted by `(net, from, to)`.

use super::config::{MutationWeights, PcbConfig};
use crate::error::{Error, Result};
use crate::layout::{net_components, Edge, Genome};
use rand::Rng;
use tracing::{error, trace, warn};

/// The mutation kinds one child can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    GlobalReposition,
    GroupTranslate,
    Rotate,
    RegenerateNet,
    RerouteEdge,
    ChangePlane,
}

impl MutationKind {
    pub const ALL: [MutationKind; 6] = [
        MutationKind::GlobalReposition,
        MutationKind::GroupTranslate,
        MutationKind::Rotate,
        MutationKind::RegenerateNet,
        MutationKind::RerouteEdge,
        MutationKind::ChangePlane,
    ];

    pub fn weight(self, weights: &MutationWeights) -> u32 {
        match self {
            MutationKind::GlobalReposition => weights.global_reposition,
            MutationKind::GroupTranslate => weights.group_translate,
            MutationKind::Rotate => weights.rotate,
            MutationKind::RegenerateNet => weights.regenerate_net,
            MutationKind::RerouteEdge => weights.reroute_edge,
            MutationKind::ChangePlane => weights.change_plane,
        }
    }
}

/// Cumulative-weight table over [`MutationKind`].
#[derive(Debug, Clone)]
pub struct MutationTable {
    cumulative: Vec<(MutationKind, u64)>,
    total: u64,
}

impl MutationTable {
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if every weight is zero.
    pub fn new(weights: &MutationWeights) -> Result<Self> {
        if weights.total() == 0 {
            return Err(Error::InvalidConfig(
                "mutation weights must not all be zero".into(),
            ));
        }
        let mut total = 0u64;
        let mut cumulative = Vec::with_capacity(MutationKind::ALL.len());
        for kind in MutationKind::ALL {
            let w = kind.weight(weights) as u64;
            if w > 0 {
                total += w;
                cumulative.push((kind, total));
            }
        }
        Ok(Self { cumulative, total })
    }

    /// Draws one kind with probability proportional to its weight.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> MutationKind {
        let r = rng.random_range(0..self.total);
        let i = self.cumulative.partition_point(|&(_, c)| c <= r);
        self.cumulative[i].0
    }
}

/// Applies one mutation of the given kind.
///
/// # Errors
/// Only [`MutationKind::RerouteEdge`] can fail; see [`reroute_edge`].
pub fn apply<R: Rng>(
    kind: MutationKind,
    genome: &mut Genome,
    config: &PcbConfig,
    rng: &mut R,
) -> Result<()> {
    trace!(?kind, "mutating");
    match kind {
        MutationKind::GlobalReposition => global_reposition(genome, config, rng),
        MutationKind::GroupTranslate => group_translate(genome, config, rng),
        MutationKind::Rotate => rotate(genome, config, rng),
        MutationKind::RegenerateNet => regenerate_net(genome, rng),
        MutationKind::RerouteEdge => return reroute_edge(genome, rng),
        MutationKind::ChangePlane => change_plane(genome, config, rng),
    }
    Ok(())
}

/// Gives each component, with probability `per_component_prob`, a new
/// rotation and then a new center that keeps it on the board.
pub fn global_reposition<R: Rng>(genome: &mut Genome, config: &PcbConfig, rng: &mut R) {
    for ci in 0..genome.components.len() {
        if !rng.random_bool(config.per_component_prob) {
            continue;
        }
        let c = &mut genome.components[ci];
        c.rotation = rng.random_range(0.0..360.0);
        let (cx, cy) = c.random_position_within_bounds(config.max_x, config.max_y, rng);
        c.cx = cx;
        c.cy = cy;
        genome.place_component(ci);
    }
}

/// Shifts each component, with probability `per_component_prob`, by one
/// shared offset of at most 5% of the board per axis.
///
/// A component the shift would push off the board stays where it is.
pub fn group_translate<R: Rng>(genome: &mut Genome, config: &PcbConfig, rng: &mut R) {
    let dx = (rng.random::<f64>() - 0.5) * config.max_x * 0.1;
    let dy = (rng.random::<f64>() - 0.5) * config.max_y * 0.1;

    for ci in 0..genome.components.len() {
        if !rng.random_bool(config.per_component_prob) {
            continue;
        }
        let c = &mut genome.components[ci];
        c.cx += dx;
        c.cy += dy;
        if c.fits_within(config.max_x, config.max_y) {
            genome.place_component(ci);
        } else {
            c.cx -= dx;
            c.cy -= dy;
        }
    }
}

/// Re-rotates each component, with probability `per_component_prob`, about
/// its unchanged center.
pub fn rotate<R: Rng>(genome: &mut Genome, config: &PcbConfig, rng: &mut R) {
    for ci in 0..genome.components.len() {
        if !rng.random_bool(config.per_component_prob) {
            continue;
        }
        genome.components[ci].rotation = rng.random_range(0.0..360.0);
        genome.place_component(ci);
    }
}

/// Rewires one uniformly chosen net as a fresh random spanning tree.
pub fn regenerate_net<R: Rng>(genome: &mut Genome, rng: &mut R) {
    if genome.nets.is_empty() {
        return;
    }
    let net = rng.random_range(0..genome.nets.len());
    genome.regenerate_net(net, rng);
}

/// Replaces one uniformly chosen edge with another that keeps its net
/// connected.
///
/// Without the chosen edge the net normally falls into two groups; the
/// replacement joins a random node of one to a random node of the other.
/// If the net is still connected the edge was redundant, and it is
/// replaced by one between two random distinct nodes of the net. The new
/// edge stays on the old edge's plane.
///
/// # Errors
/// Returns [`Error::NetCorrupted`] if removing the edge leaves more than
/// two groups, which means the net was not connected to begin with.
pub fn reroute_edge<R: Rng>(genome: &mut Genome, rng: &mut R) -> Result<()> {
    if genome.edges.is_empty() {
        return Ok(());
    }
    let index = rng.random_range(0..genome.edges.len());
    let old = genome.edges[index];
    let groups = net_components(genome, old.net, Some(index));

    let (from, to) = match groups.len() {
        2 => (
            groups[0][rng.random_range(0..groups[0].len())],
            groups[1][rng.random_range(0..groups[1].len())],
        ),
        1 => {
            let members = &groups[0];
            if members.len() < 2 {
                return Ok(());
            }
            warn!(net = old.net, edge = index, "rerouting a redundant edge");
            let i = rng.random_range(0..members.len());
            let mut j = rng.random_range(0..members.len() - 1);
            if j >= i {
                j += 1;
            }
            (members[i], members[j])
        }
        components => {
            error!(net = old.net, components, "net is not connected");
            return Err(Error::NetCorrupted {
                net: old.net,
                components,
            });
        }
    };

    genome.edges.swap_remove(index);
    genome.edges.push(Edge {
        from,
        to,
        net: old.net,
        plane: old.plane,
    });
    genome.sort_edges();
    Ok(())
}

/// Moves one uniformly chosen edge to a different plane in
/// `0..plane_count`. No-op with fewer than two planes.
pub fn change_plane<R: Rng>(genome: &mut Genome, config: &PcbConfig, rng: &mut R) {
    if genome.edges.is_empty() || config.plane_count < 2 {
        return;
    }
    let index = rng.random_range(0..genome.edges.len());
    let edge = &mut genome.edges[index];
    let mut plane = rng.random_range(0..config.plane_count - 1);
    if plane >= edge.plane {
        plane += 1;
    }
    edge.plane = plane;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::{random_board, two_resistor_board};
    use crate::layout::{is_net_connected, Net, Node};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn always() -> PcbConfig {
        PcbConfig::default()
            .with_board(400.0, 400.0)
            .with_per_component_prob(1.0)
    }

    fn is_sorted(genome: &Genome) -> bool {
        genome
            .edges
            .windows(2)
            .all(|w| w[0].sort_key() <= w[1].sort_key())
    }

    #[test]
    fn test_table_single_kind() {
        let table = MutationTable::new(&MutationWeights {
            global_reposition: 0,
            group_translate: 0,
            rotate: 0,
            regenerate_net: 0,
            reroute_edge: 5,
            change_plane: 0,
        })
        .expect("non-zero weights");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(table.pick(&mut rng), MutationKind::RerouteEdge);
        }
    }

    #[test]
    fn test_table_proportions() {
        let table = MutationTable::new(&MutationWeights {
            global_reposition: 1,
            group_translate: 0,
            rotate: 3,
            regenerate_net: 0,
            reroute_edge: 0,
            change_plane: 0,
        })
        .expect("non-zero weights");
        let mut rng = StdRng::seed_from_u64(42);
        let rotations = (0..8000)
            .filter(|_| table.pick(&mut rng) == MutationKind::Rotate)
            .count();
        assert!((5600..6400).contains(&rotations), "got {rotations}");
    }

    #[test]
    fn test_table_rejects_zero_weights() {
        let zero = MutationWeights {
            global_reposition: 0,
            group_translate: 0,
            rotate: 0,
            regenerate_net: 0,
            reroute_edge: 0,
            change_plane: 0,
        };
        assert!(matches!(
            MutationTable::new(&zero),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_global_reposition_stays_on_board() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = always();
        let mut genome = random_board(&mut rng, 8, 3, 400.0, 400.0);
        let before = genome.clone();
        global_reposition(&mut genome, &config, &mut rng);

        assert_ne!(genome.components, before.components);
        for c in &genome.components {
            assert!(c.fits_within(400.0, 400.0));
        }
        assert!(genome.validate().is_ok());
    }

    #[test]
    fn test_group_translate_shares_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        let config = always();
        let mut genome = two_resistor_board();
        let before = genome.clone();
        group_translate(&mut genome, &config, &mut rng);

        let d0 = genome.components[0].cx - before.components[0].cx;
        let d1 = genome.components[1].cx - before.components[1].cx;
        assert!((d0 - d1).abs() < 1e-9);
        assert!(d0.abs() <= 20.0);
        assert!(genome.validate().is_ok());
    }

    #[test]
    fn test_group_translate_keeps_edge_component() {
        let config = always().with_board(60.0, 30.0);
        let mut genome = two_resistor_board();
        genome.components.truncate(1);
        genome.components[0].cx = 30.0;
        genome.components[0].cy = 15.0;
        genome.place();
        genome.nodes.truncate(2);
        genome.nets = vec![Net::new(vec![0, 1])];
        genome.edges = vec![Edge::new(0, 1, 0)];

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            group_translate(&mut genome, &config, &mut rng);
            assert!(genome.components[0].fits_within(60.0, 30.0));
        }
        assert!(genome.validate().is_ok());
    }

    #[test]
    fn test_rotate_keeps_centers() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut genome = two_resistor_board();
        let before = genome.clone();
        rotate(&mut genome, &always(), &mut rng);

        for (c, b) in genome.components.iter().zip(&before.components) {
            assert_eq!((c.cx, c.cy), (b.cx, b.cy));
            assert_ne!(c.rotation, b.rotation);
        }
        assert!(genome.validate().is_ok());
    }

    #[test]
    fn test_regenerate_net_connects() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut genome = random_board(&mut rng, 8, 2, 400.0, 400.0);
        for _ in 0..20 {
            regenerate_net(&mut genome, &mut rng);
            assert!(genome.validate().is_ok());
            assert!(is_sorted(&genome));
        }
    }

    #[test]
    fn test_reroute_corrupted_net() {
        let mut genome = Genome {
            nodes: (0..4).map(|i| Node::free(i as f64 * 10.0, 0.0)).collect(),
            edges: vec![Edge::new(0, 1, 0), Edge::new(2, 3, 0)],
            nets: vec![Net::new(vec![0, 1, 2, 3])],
            components: vec![],
        };
        let before = genome.clone();
        let mut rng = StdRng::seed_from_u64(4);

        let err = reroute_edge(&mut genome, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::NetCorrupted {
                net: 0,
                components: 3
            }
        ));
        assert_eq!(genome, before);
    }

    #[test]
    fn test_reroute_redundant_edge() {
        let mut genome = Genome {
            nodes: (0..3).map(|i| Node::free(i as f64 * 10.0, 0.0)).collect(),
            edges: vec![Edge::new(0, 1, 0), Edge::new(0, 2, 0), Edge::new(1, 2, 0)],
            nets: vec![Net::new(vec![0, 1, 2])],
            components: vec![],
        };
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..20 {
            reroute_edge(&mut genome, &mut rng).expect("net stays connected");
            assert_eq!(genome.edges.len(), 3);
            assert!(genome.edges.iter().all(|e| e.from != e.to));
            assert!(is_net_connected(&genome, 0));
        }
    }

    #[test]
    fn test_reroute_keeps_plane() {
        let mut genome = two_resistor_board();
        for e in &mut genome.edges {
            e.plane = 1;
        }
        let mut rng = StdRng::seed_from_u64(12);
        reroute_edge(&mut genome, &mut rng).expect("fixture is connected");
        assert!(genome.edges.iter().all(|e| e.plane == 1));
    }

    #[test]
    fn test_change_plane() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = always().with_plane_count(4);
        let mut genome = two_resistor_board();
        for _ in 0..50 {
            let before = genome.edges.clone();
            change_plane(&mut genome, &config, &mut rng);
            let changed: Vec<_> = genome
                .edges
                .iter()
                .zip(&before)
                .filter(|(a, b)| a.plane != b.plane)
                .collect();
            assert_eq!(changed.len(), 1);
            assert!(changed[0].0.plane < 4);
        }
    }

    #[test]
    fn test_change_plane_single_plane() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = always().with_plane_count(1);
        let mut genome = two_resistor_board();
        let before = genome.clone();
        change_plane(&mut genome, &config, &mut rng);
        assert_eq!(genome, before);
    }

    #[test]
    fn test_apply_dispatches() {
        let mut rng = StdRng::seed_from_u64(10);
        let config = always();
        let mut genome = random_board(&mut rng, 6, 3, 400.0, 400.0);
        for kind in MutationKind::ALL {
            apply(kind, &mut genome, &config, &mut rng).expect("valid board");
            assert!(genome.validate().is_ok(), "{kind:?} broke the genome");
        }
    }

    proptest! {
        #[test]
        fn prop_reroute_preserves_connectivity(seed in any::<u64>(), rounds in 1usize..30) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut genome = random_board(&mut rng, 6, 3, 400.0, 400.0);
            let edge_count = genome.edges.len();

            for _ in 0..rounds {
                prop_assert!(reroute_edge(&mut genome, &mut rng).is_ok());
            }
            prop_assert_eq!(genome.edges.len(), edge_count);
            prop_assert!(is_sorted(&genome));
            for net in 0..genome.nets.len() {
                prop_assert!(is_net_connected(&genome, net));
            }
        }
    }
}
