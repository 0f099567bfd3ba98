//! Fitness-proportionate parent sampling.
//!
//! Fitness values may be negative (the PCB operators score `-cost`), so
//! they are shifted to `[0, max - min]` before being used as weights. The
//! worst individual therefore has zero weight unless every individual is
//! tied, in which case sampling is uniform.

use super::types::Evaluated;
use rand::Rng;

/// Roulette-wheel sampler over a population snapshot.
///
/// Build once per generation, then draw as many indices as needed.
///
/// # Complexity
/// O(n) to build, O(log n) per draw.
#[derive(Debug, Clone)]
pub struct FitnessSampler {
    cumulative: Vec<f64>,
}

impl FitnessSampler {
    /// Builds a sampler from the population's fitness values.
    ///
    /// Non-finite fitness values get zero weight.
    pub fn new<I>(population: &[Evaluated<I>]) -> Self {
        let finite = population.iter().map(|e| e.fitness).filter(|f| f.is_finite());
        let min = finite.clone().fold(f64::INFINITY, f64::min);
        let max = finite.fold(f64::NEG_INFINITY, f64::max);

        let mut total = 0.0;
        let cumulative = population
            .iter()
            .map(|e| {
                let weight = if !e.fitness.is_finite() {
                    0.0
                } else if min < max {
                    e.fitness - min
                } else {
                    1.0
                };
                total += weight;
                total
            })
            .collect();

        Self { cumulative }
    }

    /// Number of individuals the sampler draws from.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Draws one index.
    ///
    /// Falls back to a uniform draw if every weight is zero.
    ///
    /// # Panics
    /// Panics if the sampler is empty.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        assert!(!self.is_empty(), "cannot sample from empty population");

        let n = self.cumulative.len();
        let total = self.cumulative[n - 1];
        if total <= 0.0 {
            return rng.random_range(0..n);
        }

        let threshold = rng.random_range(0.0..total);
        self.cumulative
            .partition_point(|&c| c <= threshold)
            .min(n - 1)
    }
}
