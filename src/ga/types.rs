//! Core trait definitions for the evolutionary engine.
//!
//! [`GeneticOperators`] is the whole contract between the generic engine
//! and a problem domain. The engine never looks inside an individual; it
//! only asks the operators to recombine, perturb, grow, and score it.

use crate::error::Result;
use rand::Rng;

/// Problem-specific operators over an opaque individual type.
///
/// One offspring moves through the operators in a fixed order:
/// [`crossover`](Self::crossover) → [`mutate`](Self::mutate) →
/// [`grow`](Self::grow) → [`evaluate`](Self::evaluate).
///
/// # Thread Safety
///
/// The engine calls these methods concurrently from its worker threads,
/// each with its own RNG, so implementations must be `Send + Sync` and
/// must not keep shared mutable state.
///
/// # Implementing
///
/// ```ignore
/// struct OneMax;
///
/// impl GeneticOperators for OneMax {
///     type Individual = Vec<bool>;
///
///     fn evaluate(&self, bits: &Vec<bool>) -> f64 {
///         bits.iter().filter(|&&b| b).count() as f64
///     }
/// }
/// ```
pub trait GeneticOperators: Send + Sync {
    /// The candidate solution type.
    type Individual: Clone + Send + Sync;

    /// Scores a grown individual. Higher is better.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Combines two parents into one child. Parents must not be modified.
    ///
    /// The default implementation clones `parent1`.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Perturbs a freshly produced child in place.
    ///
    /// # Errors
    /// An error means the child is corrupt; the engine abandons the whole
    /// generation and reports it.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) -> Result<()> {
        Ok(())
    }

    /// Rebuilds any derived state after crossover and mutation, before
    /// evaluation.
    ///
    /// The default implementation is a no-op.
    fn grow(&self, _individual: &mut Self::Individual) {}
}

/// An individual together with its fitness.
#[derive(Debug, Clone)]
pub struct Evaluated<I> {
    pub individual: I,
    pub fitness: f64,
}

impl<I> Evaluated<I> {
    pub fn new(individual: I, fitness: f64) -> Self {
        Self {
            individual,
            fitness,
        }
    }
}
