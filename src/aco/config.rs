//! Colony configurations.
//!
//! [`AcsConfig`] and [`AsConfig`] hold the parameters of the two colony
//! algorithms. Both follow the same builder pattern; rates are clamped
//! into `[0, 1]` by their builders.

use crate::random::DEFAULT_SEED;

/// Configuration for Ant Colony System.
///
/// # Defaults
///
/// ```
/// use u_bioheur::aco::AcsConfig;
///
/// let config = AcsConfig::default();
/// assert_eq!(config.num_ants, 10);
/// assert_eq!(config.max_generations, 1000);
/// assert!((config.q0 - 0.9).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bioheur::aco::AcsConfig;
///
/// let config = AcsConfig::default()
///     .with_num_ants(20)
///     .with_q0(0.95)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcsConfig {
    /// Number of ants in the colony.
    pub num_ants: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Exponent applied to inverse distance in the attractiveness term.
    pub beta: f64,

    /// Probability of the greedy (exploitation) choice at each step.
    pub q0: f64,

    /// Global evaporation/reinforcement rate.
    pub alpha: f64,

    /// Local evaporation rate.
    pub rho: f64,

    /// Random seed.
    pub seed: u64,
}

impl Default for AcsConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            max_generations: 1000,
            beta: 2.0,
            q0: 0.9,
            alpha: 0.1,
            rho: 0.1,
            seed: DEFAULT_SEED,
        }
    }
}

impl AcsConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_q0(mut self, q0: f64) -> Self {
        self.q0 = q0.clamp(0.0, 1.0);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_ants == 0 {
            return Err("num_ants must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        check_exponent("beta", self.beta)?;
        check_rate("q0", self.q0)?;
        check_rate("alpha", self.alpha)?;
        check_rate("rho", self.rho)?;
        Ok(())
    }
}

/// Configuration for Ant System.
///
/// ```
/// use u_bioheur::aco::AsConfig;
///
/// let config = AsConfig::default();
/// assert!((config.rho - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsConfig {
    /// Number of ants in the colony.
    pub num_ants: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Exponent applied to pheromone intensity.
    pub alpha: f64,

    /// Exponent applied to inverse distance.
    pub beta: f64,

    /// Evaporation rate applied to every edge once per generation.
    pub rho: f64,

    /// Random seed.
    pub seed: u64,
}

impl Default for AsConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            max_generations: 1000,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
            seed: DEFAULT_SEED,
        }
    }
}

impl AsConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_ants == 0 {
            return Err("num_ants must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        check_exponent("alpha", self.alpha)?;
        check_exponent("beta", self.beta)?;
        check_rate("rho", self.rho)?;
        Ok(())
    }
}

fn check_rate(name: &str, value: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} must be in [0, 1], got {value}"))
    }
}

fn check_exponent(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be finite and non-negative, got {value}"))
    }
}
