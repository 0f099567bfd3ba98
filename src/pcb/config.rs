//! PCB operator configuration.
//!
//! [`PcbConfig`] carries the board extents, shape sizes, clearance, and
//! operator probabilities. Cost term weights live in
//! [`EvaluationWeights`] and mutation weights in [`MutationWeights`], one
//! named field per term or mutation kind.

use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative weights of the mutation kinds.
///
/// One mutation is drawn per mutated child with probability proportional
/// to its weight. A weight of zero disables that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MutationWeights {
    /// Re-place and re-rotate random components anywhere on the board.
    pub global_reposition: u32,
    /// Shift a random subset of components by one shared offset.
    pub group_translate: u32,
    /// Re-rotate random components in place.
    pub rotate: u32,
    /// Rewire one net from scratch.
    pub regenerate_net: u32,
    /// Move one wire while keeping its net connected.
    pub reroute_edge: u32,
    /// Move one wire to another routing plane.
    pub change_plane: u32,
}

impl Default for MutationWeights {
    fn default() -> Self {
        Self {
            global_reposition: 10,
            group_translate: 10,
            rotate: 10,
            regenerate_net: 10,
            reroute_edge: 10,
            change_plane: 10,
        }
    }
}

impl MutationWeights {
    pub fn total(&self) -> u64 {
        [
            self.global_reposition,
            self.group_translate,
            self.rotate,
            self.regenerate_net,
            self.reroute_edge,
            self.change_plane,
        ]
        .iter()
        .map(|&w| w as u64)
        .sum()
    }
}

/// Weights of the cost terms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationWeights {
    /// Conflict between shapes on the same plane (and every node, edge,
    /// and component conflict that has no plane distinction).
    pub same_plane: f64,
    /// Conflict between wires on different planes.
    pub different_plane: f64,
    /// Total wire length, normalized by `max_x + max_y`.
    pub edge_length: f64,
    /// Per wire routed off plane 0.
    pub non_zero_plane: f64,
    /// Per component not fully on the board.
    pub out_of_bounds: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            same_plane: 1.0,
            different_plane: 0.9,
            edge_length: 0.01,
            non_zero_plane: 0.09,
            out_of_bounds: 100.0,
        }
    }
}

/// Configuration for the PCB genetic operators and evaluator.
///
/// # Builder Pattern
///
/// ```
/// use pcb_evolve::pcb::{MutationWeights, PcbConfig};
///
/// let config = PcbConfig::default()
///     .with_board(300.0, 200.0)
///     .with_min_dist(4.0)
///     .with_mutate_prob(0.3)
///     .with_mutation_weights(MutationWeights {
///         change_plane: 0,
///         ..MutationWeights::default()
///     });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PcbConfig {
    /// Board width.
    pub max_x: f64,
    /// Board height.
    pub max_y: f64,
    /// Side of the square collision shape around each node.
    pub node_size: f64,
    /// Width of the collision shape along each wire.
    pub edge_size: f64,
    /// Shapes closer than this are in conflict.
    pub min_dist: f64,
    /// Exponent applied to the summed cost before negation.
    pub fitness_exponent: f64,
    /// Probability that a child is mutated at all.
    pub mutate_prob: f64,
    /// Per-component probability used by the component mutations.
    pub per_component_prob: f64,
    /// Number of routing planes available to the change-plane mutation.
    pub plane_count: u32,
    pub mutation_weights: MutationWeights,
    pub evaluation_weights: EvaluationWeights,
}

impl Default for PcbConfig {
    fn default() -> Self {
        Self {
            max_x: 500.0,
            max_y: 500.0,
            node_size: 10.0,
            edge_size: 5.0,
            min_dist: 2.0,
            fitness_exponent: 1.0,
            mutate_prob: 0.2,
            per_component_prob: 0.1,
            plane_count: 2,
            mutation_weights: MutationWeights::default(),
            evaluation_weights: EvaluationWeights::default(),
        }
    }
}

impl PcbConfig {
    /// Sets the board extents.
    pub fn with_board(mut self, max_x: f64, max_y: f64) -> Self {
        self.max_x = max_x;
        self.max_y = max_y;
        self
    }

    /// Sets node and wire shape sizes.
    pub fn with_shape_sizes(mut self, node_size: f64, edge_size: f64) -> Self {
        self.node_size = node_size;
        self.edge_size = edge_size;
        self
    }

    /// Sets the minimum clearance.
    pub fn with_min_dist(mut self, min_dist: f64) -> Self {
        self.min_dist = min_dist;
        self
    }

    /// Sets the fitness exponent.
    pub fn with_fitness_exponent(mut self, exponent: f64) -> Self {
        self.fitness_exponent = exponent;
        self
    }

    /// Sets the child mutation probability.
    pub fn with_mutate_prob(mut self, p: f64) -> Self {
        self.mutate_prob = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-component mutation probability.
    pub fn with_per_component_prob(mut self, p: f64) -> Self {
        self.per_component_prob = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of routing planes.
    pub fn with_plane_count(mut self, planes: u32) -> Self {
        self.plane_count = planes;
        self
    }

    pub fn with_mutation_weights(mut self, weights: MutationWeights) -> Self {
        self.mutation_weights = weights;
        self
    }

    pub fn with_evaluation_weights(mut self, weights: EvaluationWeights) -> Self {
        self.evaluation_weights = weights;
        self
    }

    /// Validates the numeric parameters.
    ///
    /// Mutation weights are checked when the mutation table is built
    /// (see [`PcbOperators::new`](super::PcbOperators::new)).
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.into()));

        if !(self.max_x > 0.0 && self.max_y > 0.0) {
            return invalid("board extents must be positive");
        }
        if !(self.node_size >= 0.0 && self.edge_size >= 0.0) {
            return invalid("node_size and edge_size must be non-negative");
        }
        if !(self.min_dist >= 0.0) {
            return invalid("min_dist must be non-negative");
        }
        if !(self.fitness_exponent > 0.0) {
            return invalid("fitness_exponent must be positive");
        }
        if !(0.0..=1.0).contains(&self.mutate_prob) || !(0.0..=1.0).contains(&self.per_component_prob) {
            return invalid("probabilities must be within [0, 1]");
        }
        if self.plane_count == 0 {
            return invalid("plane_count must be at least 1");
        }
        let w = &self.evaluation_weights;
        if [w.same_plane, w.different_plane, w.edge_length, w.non_zero_plane, w.out_of_bounds]
            .iter()
            .any(|x| !(*x >= 0.0))
        {
            return invalid("evaluation weights must be non-negative");
        }
        Ok(())
    }
}
