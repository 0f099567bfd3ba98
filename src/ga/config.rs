//! Engine configuration.
//!
//! [`GaConfig`] holds the parameters that control one generation step.

use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the evolutionary engine.
///
/// # Defaults
///
/// ```
/// use pcb_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.elite_count, 10);
/// assert!(config.parallelism >= 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use pcb_evolve::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_elite_count(5)
///     .with_random_second_parent_prob(0.2)
///     .with_parallelism(4)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of top-ranked individuals carried unchanged into the next
    /// generation.
    ///
    /// Must be smaller than the population size.
    pub elite_count: usize,

    /// Probability that the second parent is drawn uniformly at random
    /// instead of by fitness (0.0–1.0).
    ///
    /// Higher values favor diversity over exploitation.
    pub random_second_parent_prob: f64,

    /// Number of worker threads producing offspring.
    pub parallelism: usize,

    /// Random seed for the engine's master RNG.
    ///
    /// `None` uses a random seed. Worker RNGs are seeded from the master,
    /// so a fixed seed reproduces a run up to which worker handles which
    /// parent pair.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            elite_count: 10,
            random_second_parent_prob: 0.1,
            parallelism: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the elitism count.
    pub fn with_elite_count(mut self, k: usize) -> Self {
        self.elite_count = k;
        self
    }

    /// Sets the random-second-parent probability.
    pub fn with_random_second_parent_prob(mut self, p: f64) -> Self {
        self.random_second_parent_prob = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of worker threads.
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration on its own.
    ///
    /// Checks that depend on the population (elitism below population
    /// size) happen when the engine is built.
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            return Err(Error::InvalidConfig(
                "parallelism must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.random_second_parent_prob) {
            return Err(Error::InvalidConfig(
                "random_second_parent_prob must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.elite_count, 10);
        assert!((config.random_second_parent_prob - 0.1).abs() < 1e-10);
        assert!(config.parallelism >= 1);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_elite_count(3)
            .with_random_second_parent_prob(0.4)
            .with_parallelism(2)
            .with_seed(9);

        assert_eq!(config.elite_count, 3);
        assert!((config.random_second_parent_prob - 0.4).abs() < 1e-10);
        assert_eq!(config.parallelism, 2);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_clamp_probability() {
        let config = GaConfig::default().with_random_second_parent_prob(1.7);
        assert!((config.random_second_parent_prob - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_zero_workers() {
        let config = GaConfig::default().with_parallelism(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_probability_set_directly() {
        let config = GaConfig {
            random_second_parent_prob: -0.5,
            ..GaConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
