//! Circuit-board layout operators for the generic engine.
//!
//! Plugs the layout model into [`crate::ga`]: [`PcbOperators`] implements
//! [`crate::ga::GeneticOperators`] with [`crate::layout::Pcb`] as the
//! individual.
//!
//! # Key Types
//!
//! - [`PcbConfig`]: Board extents, clearance, shape sizes, probabilities
//! - [`Evaluator`]: Composite cost with bounding-box pruned conflict scan
//! - [`MutationKind`]: The six layout mutations, drawn by weight
//!
//! # Cost
//!
//! The cost sums weighted pairwise conflicts (node/node, wire/wire,
//! node/wire, component/component), normalized wire length, wires off the
//! base plane, and components off the board. Fitness is
//! `-(cost ^ fitness_exponent)`.

mod config;
mod crossover;
mod evaluation;
mod mutation;
mod operators;

pub use config::{EvaluationWeights, MutationWeights, PcbConfig};
pub use crossover::crossover;
pub use evaluation::{CostBreakdown, Evaluator};
pub use mutation::{
    apply, change_plane, global_reposition, group_translate, regenerate_net, reroute_edge, rotate,
    MutationKind, MutationTable,
};
pub use operators::PcbOperators;
