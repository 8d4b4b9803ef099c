//! PSO configuration.

use crate::random::DEFAULT_SEED;

/// Configuration for the global-best Particle Swarm Optimizer.
///
/// # Defaults
///
/// ```
/// use u_bioheur::pso::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.swarm_size, 30);
/// assert!((config.w - 0.9).abs() < 1e-12);
/// assert!((config.vmax_percent - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles.
    pub swarm_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Cognitive coefficient (pull toward the personal best).
    pub c1: f64,

    /// Social coefficient (pull toward the global best).
    pub c2: f64,

    /// Inertia weight.
    pub w: f64,

    /// Velocity limit per dimension as a fraction of that dimension's
    /// range, in `(0, 1]`.
    pub vmax_percent: f64,

    /// Random seed.
    pub seed: u64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            max_generations: 1000,
            c1: 2.0,
            c2: 2.0,
            w: 0.9,
            vmax_percent: 0.2,
            seed: DEFAULT_SEED,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    pub fn with_vmax_percent(mut self, pct: f64) -> Self {
        self.vmax_percent = pct;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.swarm_size == 0 {
            return Err("swarm_size must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        for (name, value) in [("c1", self.c1), ("c2", self.c2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and non-negative, got {value}"));
            }
        }
        if !self.w.is_finite() {
            return Err(format!("w must be finite, got {}", self.w));
        }
        if !(self.vmax_percent > 0.0 && self.vmax_percent <= 1.0) {
            return Err(format!(
                "vmax_percent must be in (0, 1], got {}",
                self.vmax_percent
            ));
        }
        Ok(())
    }
}
