//! Differential Evolution configuration.

use crate::random::DEFAULT_SEED;

/// Configuration for DE/rand/1/bin.
///
/// # Examples
///
/// ```
/// use u_bioheur::de::DeConfig;
///
/// let config = DeConfig::default().with_f(0.8).with_cr(0.5).with_seed(3);
/// assert_eq!(config.population_size, 30);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeConfig {
    /// Number of individuals. At least 4, so that three donors distinct
    /// from the target always exist.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Differential weight `F` scaling `x[b] − x[c]`.
    pub f: f64,

    /// Crossover probability `CR` (0.0–1.0).
    pub cr: f64,

    /// Random seed.
    pub seed: u64,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_generations: 1000,
            f: 0.5,
            cr: 0.9,
            seed: DEFAULT_SEED,
        }
    }
}

impl DeConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_f(mut self, f: f64) -> Self {
        self.f = f;
        self
    }

    /// Sets `CR`, clamped into `[0, 1]`.
    pub fn with_cr(mut self, cr: f64) -> Self {
        self.cr = cr.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 4 {
            return Err(format!(
                "population_size must be at least 4, got {}",
                self.population_size
            ));
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !self.f.is_finite() {
            return Err(format!("f must be finite, got {}", self.f));
        }
        if !(0.0..=1.0).contains(&self.cr) {
            return Err(format!("cr must be in [0, 1], got {}", self.cr));
        }
        Ok(())
    }
}
