//! Layout model: the genome evolved by the PCB operators.
//!
//! A [`Genome`] owns the nodes, edges (wires), nets, and components of one
//! candidate board. A [`Pcb`] pairs a genome with its derived
//! [`Geometry`], the per-entity polygons the fitness evaluator scans.
//!
//! # Invariants
//!
//! - Every pin node sits at its component's rotated offset; restore this
//!   with [`Genome::place`] after moving or rotating a component.
//! - Every net's edges connect all of the net's nodes.
//! - Edges are kept sorted by `(net, from, to)` so each net's wiring is a
//!   contiguous run.

mod connectivity;
mod genome;
mod geometry;
mod pcb;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use connectivity::{is_net_connected, net_components};
pub use genome::Genome;
pub use geometry::Geometry;
pub use pcb::Pcb;
pub use types::{Component, ComponentPin, Edge, Net, Node};
