//! [`GeneticOperators`] for circuit-board layouts.

use super::config::PcbConfig;
use super::crossover::crossover;
use super::evaluation::Evaluator;
use super::mutation::{apply, MutationTable};
use crate::error::Result;
use crate::ga::GeneticOperators;
use crate::layout::Pcb;
use rand::Rng;

/// Evaluates, recombines, mutates, and grows [`Pcb`] individuals.
///
/// # Examples
///
/// ```
/// use pcb_evolve::ga::{GaConfig, GaEngine};
/// use pcb_evolve::layout::{Edge, Genome, Net, Node, Pcb};
/// use pcb_evolve::pcb::{PcbConfig, PcbOperators};
///
/// let genome = Genome {
///     nodes: vec![Node::free(10.0, 10.0), Node::free(12.0, 10.0), Node::free(90.0, 90.0)],
///     edges: vec![Edge::new(0, 2, 0), Edge::new(1, 2, 0)],
///     nets: vec![Net::new(vec![0, 1, 2])],
///     components: vec![],
/// };
/// let operators = PcbOperators::new(PcbConfig::default().with_board(100.0, 100.0)).unwrap();
/// let population = vec![Pcb::try_new(genome).unwrap(); 8];
/// let config = GaConfig::default().with_elite_count(2).with_seed(7);
///
/// let mut engine = GaEngine::new(operators, population, config).unwrap();
/// engine.compute_next_generation().unwrap();
/// assert!(engine.best().individual.is_grown());
/// ```
#[derive(Debug, Clone)]
pub struct PcbOperators {
    config: PcbConfig,
    evaluator: Evaluator,
    mutations: MutationTable,
}

impl PcbOperators {
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if `config` fails validation
    /// or every mutation weight is zero.
    pub fn new(config: PcbConfig) -> Result<Self> {
        config.validate()?;
        let mutations = MutationTable::new(&config.mutation_weights)?;
        Ok(Self {
            evaluator: Evaluator::new(&config),
            config,
            mutations,
        })
    }

    pub fn config(&self) -> &PcbConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}

impl GeneticOperators for PcbOperators {
    type Individual = Pcb;

    fn evaluate(&self, pcb: &Pcb) -> f64 {
        self.evaluator.fitness(pcb)
    }

    fn crossover<R: Rng>(&self, parent1: &Pcb, parent2: &Pcb, rng: &mut R) -> Pcb {
        Pcb::new(crossover(parent1.genome(), parent2.genome(), rng))
    }

    fn mutate<R: Rng>(&self, pcb: &mut Pcb, rng: &mut R) -> Result<()> {
        if !rng.random_bool(self.config.mutate_prob) {
            return Ok(());
        }
        let kind = self.mutations.pick(rng);
        apply(kind, pcb.genome_mut(), &self.config, rng)
    }

    fn grow(&self, pcb: &mut Pcb) {
        pcb.grow(self.config.node_size, self.config.edge_size);
    }
}
