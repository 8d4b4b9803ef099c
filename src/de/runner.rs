//! DE/rand/1/bin execution loop.
//!
//! For each target `x[i]`:
//!
//! 1. Draw a mandatory dimension `j` and three distinct donors
//!    `a, b, c ≠ i`
//! 2. Build the trial: dimension `d` takes `x[a] + F·(x[b] − x[c])` when
//!    a uniform draw is `≤ CR` or `d == j`, otherwise `x[i][d]`
//! 3. Redraw any out-of-bounds trial dimension uniformly within bounds
//! 4. Replace `x[i]` in place if the trial is strictly fitter

use rand::seq::index::sample;
use rand::Rng;
use tracing::{debug, info};

use super::config::DeConfig;
use crate::best::GlobalBest;
use crate::error::{MetaheurError, Result};
use crate::problem::{validate_objective, Objective};
use crate::random::{create_rng, uniform, SolverRng};
use crate::result::VectorResult;

/// Differential Evolution over a borrowed objective.
///
/// # Usage
///
/// ```
/// use u_bioheur::de::{DeConfig, DeRunner};
/// use u_bioheur::problem::{Bounds, Sphere};
///
/// let sphere = Sphere::new(Bounds::uniform(3, -5.0, 5.0).unwrap());
/// let config = DeConfig::default().with_max_generations(300).with_seed(1);
/// let mut de = DeRunner::new(&sphere, config).unwrap();
/// de.run();
/// assert!(de.best_value() < 1e-3);
/// ```
pub struct DeRunner<'a, O: Objective + ?Sized> {
    objective: &'a O,
    config: DeConfig,
    rng: SolverRng,
    population: Vec<Vec<f64>>,
    values: Vec<f64>,
    best: GlobalBest<Vec<f64>>,
    generation: usize,
    history: Vec<f64>,
}

impl<'a, O: Objective + ?Sized> DeRunner<'a, O> {
    /// Validates the inputs and samples the initial population uniformly
    /// within bounds.
    ///
    /// # Errors
    /// [`MetaheurError::InvalidConfig`] for bad parameters; the errors of
    /// [`validate_objective`] for malformed bounds.
    pub fn new(objective: &'a O, config: DeConfig) -> Result<Self> {
        config.validate().map_err(MetaheurError::InvalidConfig)?;
        validate_objective(objective)?;

        let mut rng = create_rng(config.seed);
        let lower = objective.lower_bounds();
        let upper = objective.upper_bounds();

        let population: Vec<Vec<f64>> = (0..config.population_size)
            .map(|_| {
                lower
                    .iter()
                    .zip(upper)
                    .map(|(&lo, &hi)| uniform(lo, hi, &mut rng))
                    .collect()
            })
            .collect();
        let values: Vec<f64> = population.iter().map(|x| objective.evaluate(x)).collect();

        let mut leader = 0;
        for i in 1..values.len() {
            if objective.is_fitter(values[i], values[leader]) {
                leader = i;
            }
        }
        let best = GlobalBest::new(population[leader].clone(), values[leader]);
        debug!(best_value = best.quality(), "de initial population");

        Ok(Self {
            objective,
            rng,
            population,
            values,
            history: vec![best.quality()],
            best,
            generation: 0,
            config,
        })
    }

    /// Runs `max_generations` generations.
    pub fn run(&mut self) {
        for _ in 0..self.config.max_generations {
            self.step();
        }
        info!(
            generations = self.generation,
            best_value = self.best.quality(),
            "de run complete"
        );
    }

    /// Executes a single generation.
    pub fn step(&mut self) {
        let objective = self.objective;
        let mut trial = Vec::with_capacity(objective.dimension());

        for i in 0..self.population.len() {
            self.build_trial(i, &mut trial);
            let value = objective.evaluate(&trial);
            if objective.is_fitter(value, self.values[i]) {
                self.population[i].clone_from(&trial);
                self.values[i] = value;
                self.best
                    .replace_if_fitter(trial.as_slice(), value, |a, b| objective.is_fitter(a, b));
            }
        }

        self.generation += 1;
        self.history.push(self.best.quality());
        debug!(
            generation = self.generation,
            best_value = self.best.quality(),
            "de generation"
        );
    }

    fn build_trial(&mut self, i: usize, trial: &mut Vec<f64>) {
        let objective = self.objective;
        let lower = objective.lower_bounds();
        let upper = objective.upper_bounds();
        let dim = lower.len();
        let np = self.population.len();

        let j = self.rng.random_range(0..dim);
        let donors = sample(&mut self.rng, np - 1, 3);
        let pick = |k: usize| {
            let idx = donors.index(k);
            if idx >= i {
                idx + 1
            } else {
                idx
            }
        };
        let (xa, xb, xc) = (
            &self.population[pick(0)],
            &self.population[pick(1)],
            &self.population[pick(2)],
        );
        let target = &self.population[i];

        trial.clear();
        for d in 0..dim {
            let r: f64 = self.rng.random();
            let mut value = if d == j || r <= self.config.cr {
                xa[d] + self.config.f * (xb[d] - xc[d])
            } else {
                target[d]
            };
            if !(lower[d]..=upper[d]).contains(&value) {
                value = uniform(lower[d], upper[d], &mut self.rng);
            }
            trial.push(value);
        }
    }

    pub fn best_position(&self) -> &[f64] {
        self.best.encoding()
    }

    pub fn best_value(&self) -> f64 {
        self.best.quality()
    }

    pub fn population(&self) -> &[Vec<f64>] {
        &self.population
    }

    /// Objective values aligned with [`population`](Self::population).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best value after initialization and after each generation.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn result(&self) -> VectorResult {
        VectorResult {
            position: self.best.encoding().clone(),
            value: self.best.quality(),
            generations: self.generation,
            value_history: self.history.clone(),
        }
    }
}
