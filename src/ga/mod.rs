//! Generic evolutionary engine.
//!
//! A domain-agnostic, parallel, generational engine built on one trait.
//! Users plug in their problem by implementing [`GeneticOperators`], which
//! specifies how to evaluate, recombine, mutate, and grow individuals. The
//! engine never depends on the individual's representation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Elitism, random-second-parent probability, worker count, seed
//! - [`GaEngine`]: Owns the ranked population and computes generations
//! - [`FitnessSampler`]: Fitness-proportionate parent sampling
//! - [`Evaluated`]: An individual paired with its fitness
//!
//! # One Generation
//!
//! 1. The top `elite_count` individuals survive unchanged.
//! 2. Parent pairs are drawn by fitness; with some probability the second
//!    parent is drawn uniformly instead.
//! 3. A fixed pool of worker threads pulls pairs from a shared queue and
//!    runs crossover → mutate → grow → evaluate, each with its own RNG.
//! 4. Elite and offspring are re-ranked by a stable descending sort.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaEngine, GenerationStats};
pub use selection::FitnessSampler;
pub use types::{Evaluated, GeneticOperators};
