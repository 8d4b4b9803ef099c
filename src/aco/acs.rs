//! Ant Colony System execution loop.
//!
//! # Algorithm (Dorigo & Gambardella, 1997)
//!
//! 1. Seed the global best with a nearest-neighbor tour of length `L_nn`
//!    and fill the pheromone matrix with `τ0 = 1 / (n · L_nn)`
//! 2. Each generation:
//!    a. Place every ant on a uniformly random start city
//!    b. For `n − 1` steps, every ant picks its next city with the
//!       pseudo-random proportional rule, then the local rule is applied
//!       to each ant's last edge
//!    c. Close every tour and apply the local rule to the closing edge
//!    d. Replace the global best with the generation's shortest tour if it
//!       is strictly shorter, then reinforce the global-best edges only

use rand::Rng;
use tracing::{debug, info};

use super::ant::{pseudo_random_proportional, Ant, Visibility};
use super::config::AcsConfig;
use super::pheromone::PheromoneMatrix;
use crate::best::GlobalBest;
use crate::error::{MetaheurError, Result};
use crate::problem::{validate_tour_problem, Direction, Distances};
use crate::random::{create_rng, SolverRng};
use crate::result::TourResult;
use crate::tour::nearest_neighbor;

/// Ant Colony System solver for a borrowed distance table.
///
/// # Usage
///
/// ```
/// use u_bioheur::aco::{AcsConfig, AcsRunner};
/// use u_bioheur::problem::DistanceMatrix;
///
/// let m = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let mut acs = AcsRunner::new(&m, AcsConfig::default().with_max_generations(20)).unwrap();
/// acs.run();
/// assert!((acs.best_length() - 4.0).abs() < 1e-9);
/// ```
pub struct AcsRunner<'a, D: Distances + ?Sized> {
    distances: &'a D,
    config: AcsConfig,
    rng: SolverRng,
    pheromone: PheromoneMatrix,
    visibility: Visibility,
    tao0: f64,
    ants: Vec<Ant>,
    weights: Vec<f64>,
    best: GlobalBest<Vec<usize>>,
    generation: usize,
    history: Vec<f64>,
}

impl<'a, D: Distances + ?Sized> AcsRunner<'a, D> {
    /// Validates the inputs and runs the initialization phase.
    ///
    /// # Errors
    /// [`MetaheurError::InvalidConfig`] for bad parameters; the errors of
    /// [`validate_tour_problem`] for a malformed distance table.
    pub fn new(distances: &'a D, config: AcsConfig) -> Result<Self> {
        config.validate().map_err(MetaheurError::InvalidConfig)?;
        validate_tour_problem(distances)?;

        let n = distances.num_cities();
        let mut rng = create_rng(config.seed);

        let (tour, length) = nearest_neighbor(distances, &mut rng);
        let tao0 = 1.0 / (n as f64 * length);
        debug!(length, tao0, "acs nearest-neighbor seed");

        Ok(Self {
            distances,
            pheromone: PheromoneMatrix::uniform(n, tao0),
            visibility: Visibility::new(distances, config.beta)?,
            tao0,
            ants: (0..config.num_ants).map(|_| Ant::with_capacity(n)).collect(),
            weights: Vec::with_capacity(n),
            best: GlobalBest::new(tour, length),
            generation: 0,
            history: vec![length],
            rng,
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
            best_length = self.best.quality(),
            "acs run complete"
        );
    }

    /// Executes a single generation.
    pub fn step(&mut self) {
        let n = self.distances.num_cities();

        for ant in &mut self.ants {
            let start = self.rng.random_range(0..n);
            ant.reset(n, start);
        }

        for _ in 1..n {
            for ant in &mut self.ants {
                let pos = pseudo_random_proportional(
                    ant,
                    &self.pheromone,
                    &self.visibility,
                    self.config.q0,
                    &mut self.weights,
                    &mut self.rng,
                );
                ant.advance(pos, self.distances);
            }
            self.local_update();
        }

        for ant in &mut self.ants {
            ant.close(self.distances);
        }
        self.local_update();

        self.global_update();

        self.generation += 1;
        self.history.push(self.best.quality());
        debug!(
            generation = self.generation,
            best_length = self.best.quality(),
            "acs generation"
        );
    }

    /// Applies the local rule to every ant's most recent edge.
    fn local_update(&mut self) {
        for ant in &self.ants {
            if let Some((from, to)) = ant.last_edge() {
                self.pheromone
                    .local_update(from, to, self.config.rho, self.tao0);
            }
        }
    }

    /// Offers the generation's best ant to the global best, then
    /// reinforces the global-best tour.
    fn global_update(&mut self) {
        let mut leader = &self.ants[0];
        for ant in &self.ants[1..] {
            if ant.length() < leader.length() {
                leader = ant;
            }
        }
        self.best.replace_if_fitter(leader.tour(), leader.length(), |a, b| {
            Direction::Minimize.is_fitter(a, b)
        });

        let delta = 1.0 / self.best.quality();
        for edge in self.best.encoding().windows(2) {
            self.pheromone
                .reinforce(edge[0], edge[1], self.config.alpha, delta);
        }
    }

    /// Best closed tour found so far.
    pub fn best_tour(&self) -> &[usize] {
        self.best.encoding()
    }

    pub fn best_length(&self) -> f64 {
        self.best.quality()
    }

    /// Initial pheromone level `τ0`.
    pub fn tao0(&self) -> f64 {
        self.tao0
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Ants as left by the last generation (closed tours).
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best length after initialization and after each generation.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn result(&self) -> TourResult {
        TourResult {
            tour: self.best.encoding().clone(),
            length: self.best.quality(),
            generations: self.generation,
            length_history: self.history.clone(),
        }
    }
}
