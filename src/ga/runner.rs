//! Generation-by-generation evolutionary engine.
//!
//! [`GaEngine`] owns a ranked population and advances it one generation
//! per call to [`compute_next_generation`](GaEngine::compute_next_generation):
//! elitism → weighted parent sampling → parallel crossover/mutate/grow/evaluate
//! → stable re-ranking.

use super::config::GaConfig;
use super::selection::FitnessSampler;
use super::types::{Evaluated, GeneticOperators};
use crate::error::{Error, Result};
use crossbeam_deque::{Injector, Steal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Summary of the population after a generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generations completed so far; `0` for the initial population.
    pub generation: usize,

    /// Fitness of the top-ranked individual.
    pub best: f64,

    /// Fitness of the bottom-ranked individual.
    pub worst: f64,

    /// Mean fitness over the population.
    pub mean: f64,

    /// Wall-clock time spent producing the generation.
    pub elapsed: Duration,
}

impl GenerationStats {
    fn from_ranked<I>(generation: usize, population: &[Evaluated<I>], elapsed: Duration) -> Self {
        let n = population.len().max(1) as f64;
        Self {
            generation,
            best: population.first().map_or(f64::NAN, |e| e.fitness),
            worst: population.last().map_or(f64::NAN, |e| e.fitness),
            mean: population.iter().map(|e| e.fitness).sum::<f64>() / n,
            elapsed,
        }
    }
}

/// One offspring to produce: its output slot and the two parent indices.
#[derive(Debug, Clone, Copy)]
struct Job {
    slot: usize,
    first: usize,
    second: usize,
}

/// Executes the evolutionary loop one generation at a time.
///
/// The population is always sorted by descending fitness, so index `0` is
/// the best individual. The driving loop, stopping criteria, and any
/// rendering or persistence between generations belong to the caller.
///
/// # Usage
///
/// ```ignore
/// let mut engine = GaEngine::new(operators, initial_population, GaConfig::default())?;
/// for _ in 0..1000 {
///     engine.compute_next_generation()?;
///     println!("best: {}", engine.best().fitness);
/// }
/// ```
pub struct GaEngine<O: GeneticOperators> {
    operators: O,
    config: GaConfig,
    population: Vec<Evaluated<O::Individual>>,
    pool: ThreadPool,
    rng: StdRng,
    stats: GenerationStats,
}

impl<O: GeneticOperators> GaEngine<O> {
    /// Builds the engine, growing and evaluating the initial population in
    /// parallel and ranking it.
    ///
    /// # Errors
    /// - [`Error::EmptyPopulation`] if `initial` is empty
    /// - [`Error::InvalidConfig`] if the config is invalid or the elite
    ///   would fill the whole population
    /// - [`Error::ThreadPool`] if the worker pool cannot be started
    pub fn new(operators: O, initial: Vec<O::Individual>, config: GaConfig) -> Result<Self> {
        config.validate()?;
        if initial.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        if config.elite_count >= initial.len() {
            return Err(Error::InvalidConfig(format!(
                "elite_count {} leaves no room for offspring in a population of {}",
                config.elite_count,
                initial.len()
            )));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .thread_name(|i| format!("ga-worker-{i}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

        let start = Instant::now();
        let ops = &operators;
        let mut population: Vec<Evaluated<O::Individual>> = pool.install(|| {
            initial
                .into_par_iter()
                .map(|mut individual| {
                    ops.grow(&mut individual);
                    let fitness = ops.evaluate(&individual);
                    Evaluated::new(individual, fitness)
                })
                .collect()
        });
        sort_population(&mut population);

        let stats = GenerationStats::from_ranked(0, &population, start.elapsed());
        info!(
            population = population.len(),
            elite = config.elite_count,
            workers = config.parallelism,
            best = stats.best,
            "engine initialized"
        );

        Ok(Self {
            operators,
            config,
            population,
            pool,
            rng,
            stats,
        })
    }

    /// Replaces the population with the next generation.
    ///
    /// Blocks until every offspring has been produced. The population is
    /// only replaced once all offspring succeed.
    ///
    /// # Errors
    /// Returns the first error raised by [`GeneticOperators::mutate`]; the
    /// generation is discarded and the current population is kept as is.
    /// Such errors signal a corrupted individual and the run should stop.
    pub fn compute_next_generation(&mut self) -> Result<()> {
        let start = Instant::now();
        let n = self.population.len();
        let elite = self.config.elite_count;
        let to_generate = n - elite;

        let sampler = FitnessSampler::new(&self.population);
        let jobs = Injector::new();
        for slot in 0..to_generate {
            let first = sampler.sample(&mut self.rng);
            let second = if self.rng.random_bool(self.config.random_second_parent_prob) {
                self.rng.random_range(0..n)
            } else {
                sampler.sample(&mut self.rng)
            };
            jobs.push(Job {
                slot,
                first,
                second,
            });
        }

        let seeds: Vec<u64> = (0..self.pool.current_num_threads())
            .map(|_| self.rng.random())
            .collect();
        let aborted = AtomicBool::new(false);
        let operators = &self.operators;
        let parents = &self.population;

        let batches = self.pool.broadcast(|ctx| {
            let mut rng = StdRng::seed_from_u64(seeds[ctx.index()]);
            let mut produced = Vec::new();
            while !aborted.load(Ordering::Relaxed) {
                match jobs.steal() {
                    Steal::Success(job) => {
                        let outcome = breed(operators, parents, job, &mut rng);
                        if outcome.is_err() {
                            aborted.store(true, Ordering::Relaxed);
                        }
                        produced.push((job.slot, outcome));
                    }
                    Steal::Retry => continue,
                    Steal::Empty => break,
                }
            }
            produced
        });

        let mut outcomes: Vec<(usize, Result<Evaluated<O::Individual>>)> =
            batches.into_iter().flatten().collect();
        outcomes.sort_by_key(|(slot, _)| *slot);

        let mut offspring = Vec::with_capacity(to_generate);
        for (_, outcome) in outcomes {
            offspring.push(outcome?);
        }

        self.population.truncate(elite);
        self.population.extend(offspring);
        sort_population(&mut self.population);

        self.stats = GenerationStats::from_ranked(
            self.stats.generation + 1,
            &self.population,
            start.elapsed(),
        );
        debug!(
            generation = self.stats.generation,
            best = self.stats.best,
            worst = self.stats.worst,
            mean = self.stats.mean,
            elapsed_ms = self.stats.elapsed.as_secs_f64() * 1000.0,
            "generation complete"
        );

        Ok(())
    }

    /// The ranked population, best first.
    pub fn population(&self) -> &[Evaluated<O::Individual>] {
        &self.population
    }

    /// The best individual of the current population.
    pub fn best(&self) -> &Evaluated<O::Individual> {
        &self.population[0]
    }

    /// Statistics of the most recent generation.
    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Number of generations computed so far.
    pub fn generation(&self) -> usize {
        self.stats.generation
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn operators(&self) -> &O {
        &self.operators
    }

    /// Consumes the engine, returning the ranked population.
    pub fn into_population(self) -> Vec<Evaluated<O::Individual>> {
        self.population
    }
}

/// Produces one offspring: crossover → mutate → grow → evaluate.
fn breed<O: GeneticOperators, R: Rng>(
    operators: &O,
    parents: &[Evaluated<O::Individual>],
    job: Job,
    rng: &mut R,
) -> Result<Evaluated<O::Individual>> {
    let mut child = operators.crossover(
        &parents[job.first].individual,
        &parents[job.second].individual,
        rng,
    );
    operators.mutate(&mut child, rng)?;
    operators.grow(&mut child);
    let fitness = operators.evaluate(&child);
    Ok(Evaluated::new(child, fitness))
}

/// Stable sort by descending fitness; ties keep their relative order.
///
/// NaN ranks with negative infinity, below every finite fitness.
fn sort_population<I>(population: &mut [Evaluated<I>]) {
    let rank = |f: f64| if f.is_nan() { f64::NEG_INFINITY } else { f };
    population.sort_by(|a, b| rank(b.fitness).total_cmp(&rank(a.fitness)));
}

// ============================================================================
// Tests
// ============================================================================
