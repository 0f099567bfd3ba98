//! Layout fixtures shared by unit tests.

use super::genome::Genome;
use super::types::{Component, ComponentPin, Edge, Net, Node};
use rand::Rng;

fn pins(offsets: &[(f64, f64)]) -> Vec<ComponentPin> {
    offsets
        .iter()
        .map(|&(dx, dy)| ComponentPin { node: 0, dx, dy })
        .collect()
}

/// Two-pin footprint, 50 x 20.
pub fn resistor() -> Component {
    Component::new(pins(&[(-15.0, 0.0), (15.0, 0.0)]), -25.0, -10.0, 25.0, 10.0)
}

/// Three-pin footprint, 80 x 20.
pub fn transistor() -> Component {
    Component::new(
        pins(&[(-30.0, 0.0), (0.0, 0.0), (30.0, 0.0)]),
        -40.0,
        -10.0,
        40.0,
        10.0,
    )
}

/// Two placed resistors plus one freestanding routing point.
///
/// Nodes 0/1 belong to component 0, nodes 2/3 to component 1, node 4 is
/// free. Net 0 = {0, 2, 4}, net 1 = {1, 3}.
pub fn two_resistor_board() -> Genome {
    let mut components = vec![resistor(), resistor()];
    for (ci, c) in components.iter_mut().enumerate() {
        for (pi, pin) in c.pins.iter_mut().enumerate() {
            pin.node = ci * 2 + pi;
        }
    }
    components[0].cx = 100.0;
    components[0].cy = 100.0;
    components[1].cx = 200.0;
    components[1].cy = 150.0;

    let mut genome = Genome {
        nodes: vec![
            Node::pin(0.0, 0.0, 0),
            Node::pin(0.0, 0.0, 0),
            Node::pin(0.0, 0.0, 1),
            Node::pin(0.0, 0.0, 1),
            Node::free(150.0, 220.0),
        ],
        edges: vec![Edge::new(0, 2, 0), Edge::new(4, 0, 0), Edge::new(1, 3, 1)],
        nets: vec![Net::new(vec![0, 2, 4]), Net::new(vec![1, 3])],
        components,
    };
    genome.place();
    genome.sort_edges();
    genome
}

/// Random board in the manner of a scenario generator: components drawn
/// from the two templates, placed in bounds, every pin assigned to a random
/// net, and each net wired as a random spanning tree.
pub fn random_board<R: Rng>(
    rng: &mut R,
    component_count: usize,
    net_count: usize,
    max_x: f64,
    max_y: f64,
) -> Genome {
    let mut genome = Genome {
        nets: vec![Net::default(); net_count],
        ..Genome::default()
    };

    for ci in 0..component_count {
        let mut c = if rng.random_bool(0.5) {
            resistor()
        } else {
            transistor()
        };
        for pin in &mut c.pins {
            pin.node = genome.nodes.len();
            genome.nodes.push(Node::pin(0.0, 0.0, ci));
        }
        let (cx, cy) = c.random_position_within_bounds(max_x, max_y, rng);
        c.cx = cx;
        c.cy = cy;
        genome.components.push(c);
    }
    genome.place();

    for node in 0..genome.nodes.len() {
        let net = rng.random_range(0..net_count);
        genome.nets[net].nodes.push(node);
    }
    for net in 0..net_count {
        genome.regenerate_net(net, rng);
    }
    genome
}

/// Copy of `genome` with every component moved to a new random spot.
pub fn scramble<R: Rng>(genome: &Genome, max_x: f64, max_y: f64, rng: &mut R) -> Genome {
    let mut copy = genome.clone();
    for ci in 0..copy.components.len() {
        let (cx, cy) = copy.components[ci].random_position_within_bounds(max_x, max_y, rng);
        copy.components[ci].cx = cx;
        copy.components[ci].cy = cy;
        copy.place_component(ci);
    }
    copy
}
