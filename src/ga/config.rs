//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::random::DEFAULT_SEED;

/// Configuration for the TSP Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_bioheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bioheur::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_crossover_rate(0.8)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes in the population.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Probability that a chromosome takes part in crossover (0.0–1.0).
    ///
    /// Participants are paired in population order.
    pub crossover_rate: f64,

    /// Probability of applying swap mutation to a chromosome (0.0–1.0).
    pub mutation_rate: f64,

    /// Fraction of the initial population built by the nearest-neighbor
    /// heuristic (0.0–1.0). The rest is shuffled uniformly.
    pub greedy_ratio: f64,

    /// Random seed.
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_generations: 1000,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            greedy_ratio: 0.1,
            seed: DEFAULT_SEED,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the fraction of greedily seeded chromosomes.
    pub fn with_greedy_ratio(mut self, ratio: f64) -> Self {
        self.greedy_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of chromosomes seeded by the nearest-neighbor heuristic.
    pub fn greedy_count(&self) -> usize {
        ((self.population_size as f64 * self.greedy_ratio).round() as usize)
            .min(self.population_size)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        for (name, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("greedy_ratio", self.greedy_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        Ok(())
    }
}
