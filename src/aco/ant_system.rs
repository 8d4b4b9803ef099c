//! Ant System execution loop.
//!
//! # Algorithm (Dorigo, Maniezzo & Colorni, 1996)
//!
//! 1. Seed the global best with a nearest-neighbor tour of length `L_nn`
//!    and fill the pheromone matrix with `τ0 = m / L_nn` (`m` ants)
//! 2. Each generation:
//!    a. Every ant, in turn, builds a full tour with the random
//!       proportional rule `p ∝ τ^α · d^(−β)`
//!    b. The generation's shortest tour replaces the global best if it is
//!       strictly shorter
//!    c. Every edge evaporates, `τ = max((1 − ρ)·τ, τ0)`, then every ant
//!       deposits `1 / L_k` on the edges of its own tour

use rand::Rng;
use tracing::{debug, info, warn};

use super::ant::{random_proportional, Ant, Visibility};
use super::config::AsConfig;
use super::pheromone::PheromoneMatrix;
use crate::best::GlobalBest;
use crate::error::{MetaheurError, Result};
use crate::problem::{validate_tour_problem, Direction, Distances};
use crate::random::{create_rng, SolverRng};
use crate::result::TourResult;
use crate::tour::nearest_neighbor;

/// Ant System solver for a borrowed distance table.
///
/// Unlike [`AcsRunner`](super::AcsRunner), a generation can fail: if a
/// roulette weight underflows to exactly zero the run stops with
/// [`MetaheurError::ZeroWeight`], and if a weight or the weight sum
/// overflows it stops with [`MetaheurError::NonFiniteWeight`]. The global
/// best found before the failure stays available.
///
/// # Usage
///
/// ```
/// use u_bioheur::aco::{AsConfig, AsRunner};
/// use u_bioheur::problem::DistanceMatrix;
///
/// let m = DistanceMatrix::from_points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]).unwrap();
/// let mut ant_system = AsRunner::new(&m, AsConfig::default().with_max_generations(20)).unwrap();
/// ant_system.run().unwrap();
/// assert!((ant_system.best_length() - 6.0).abs() < 1e-9);
/// ```
pub struct AsRunner<'a, D: Distances + ?Sized> {
    distances: &'a D,
    config: AsConfig,
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

impl<'a, D: Distances + ?Sized> AsRunner<'a, D> {
    /// Validates the inputs and runs the initialization phase.
    pub fn new(distances: &'a D, config: AsConfig) -> Result<Self> {
        config.validate().map_err(MetaheurError::InvalidConfig)?;
        validate_tour_problem(distances)?;

        let n = distances.num_cities();
        let mut rng = create_rng(config.seed);

        let (tour, length) = nearest_neighbor(distances, &mut rng);
        let tao0 = config.num_ants as f64 / length;
        debug!(length, tao0, "ant system nearest-neighbor seed");

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
    ///
    /// # Errors
    /// Stops at the first generation whose roulette cannot be formed and
    /// returns [`MetaheurError::ZeroWeight`] or
    /// [`MetaheurError::NonFiniteWeight`].
    pub fn run(&mut self) -> Result<()> {
        for _ in 0..self.config.max_generations {
            self.step()?;
        }
        info!(
            generations = self.generation,
            best_length = self.best.quality(),
            "ant system run complete"
        );
        Ok(())
    }

    /// Executes a single generation.
    pub fn step(&mut self) -> Result<()> {
        let n = self.distances.num_cities();

        for ant in &mut self.ants {
            let start = self.rng.random_range(0..n);
            ant.reset(n, start);
        }

        for ant in &mut self.ants {
            for _ in 1..n {
                let pos = random_proportional(
                    ant,
                    &self.pheromone,
                    &self.visibility,
                    self.config.alpha,
                    &mut self.weights,
                    &mut self.rng,
                )
                .inspect_err(|err| {
                    warn!(%err, generation = self.generation, "ant system aborted");
                })?;
                ant.advance(pos, self.distances);
            }
            ant.close(self.distances);
        }

        self.update_best();
        self.global_update();

        self.generation += 1;
        self.history.push(self.best.quality());
        debug!(
            generation = self.generation,
            best_length = self.best.quality(),
            "ant system generation"
        );
        Ok(())
    }

    fn update_best(&mut self) {
        let mut leader = &self.ants[0];
        for ant in &self.ants[1..] {
            if ant.length() < leader.length() {
                leader = ant;
            }
        }
        self.best.replace_if_fitter(leader.tour(), leader.length(), |a, b| {
            Direction::Minimize.is_fitter(a, b)
        });
    }

    /// Evaporates every edge, then lets every ant deposit on its own tour.
    fn global_update(&mut self) {
        self.pheromone.evaporate(self.config.rho, self.tao0);
        for ant in &self.ants {
            let deposit = 1.0 / ant.length();
            for edge in ant.tour().windows(2) {
                self.pheromone.deposit(edge[0], edge[1], deposit);
            }
        }
    }

    /// Best closed tour found so far.
    pub fn best_tour(&self) -> &[usize] {
        self.best.encoding()
    }

    pub fn best_length(&self) -> f64 {
        self.best.quality()
    }

    /// Initial pheromone level and evaporation floor `τ0`.
    pub fn tao0(&self) -> f64 {
        self.tao0
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::DistanceMatrix;
    use crate::tour::{closed_length, is_permutation};

    fn random_points(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = create_rng(seed);
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        DistanceMatrix::from_points(&points).unwrap()
    }

    #[test]
    fn test_tao0_scales_with_colony() {
        let m = random_points(6, 1);
        let runner = AsRunner::new(&m, AsConfig::default().with_num_ants(4)).unwrap();
        let expected = 4.0 / runner.best_length();
        assert!((runner.tao0() - expected).abs() < 1e-15);
        assert!((runner.pheromone().get(0, 5) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_every_ant_tour_is_a_permutation() {
        let m = random_points(10, 2);
        let mut runner = AsRunner::new(&m, AsConfig::default().with_seed(3)).unwrap();
        for _ in 0..25 {
            runner.step().unwrap();
            for ant in runner.ants() {
                let tour = ant.tour();
                assert_eq!(tour.len(), 11);
                assert_eq!(tour[0], tour[10]);
                assert!(is_permutation(&tour[..10], 10), "invalid tour {tour:?}");
                assert!((closed_length(&m, tour) - ant.length()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_pheromone_never_below_tao0() {
        let m = random_points(8, 4);
        let mut runner = AsRunner::new(&m, AsConfig::default().with_seed(5)).unwrap();
        for _ in 0..30 {
            runner.step().unwrap();
        }
        let floor = runner.tao0();
        for i in 0..8 {
            for j in 0..8 {
                assert!(runner.pheromone().get(i, j) >= floor);
            }
        }
    }

    #[test]
    fn test_history_non_increasing_and_consistent() {
        let m = random_points(14, 6);
        let config = AsConfig::default().with_max_generations(80).with_seed(7);
        let mut runner = AsRunner::new(&m, config).unwrap();
        runner.run().unwrap();

        let result = runner.result();
        assert_eq!(result.generations, 80);
        assert_eq!(result.length_history.len(), 81);
        for window in result.length_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        assert!((closed_length(&m, &result.tour) - result.length).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let m = random_points(9, 8);
        let config = AsConfig::default().with_max_generations(40).with_seed(21);
        let mut a = AsRunner::new(&m, config.clone()).unwrap();
        let mut b = AsRunner::new(&m, config).unwrap();
        a.run().unwrap();
        b.run().unwrap();
        assert_eq!(a.result(), b.result());
    }

    #[test]
    fn test_zero_weight_aborts_with_error() {
        // 10^-400 underflows to 0.0
        let m = DistanceMatrix::new(vec![
            vec![0.0, 10.0, 10.0],
            vec![10.0, 0.0, 10.0],
            vec![10.0, 10.0, 0.0],
        ])
        .unwrap();
        let config = AsConfig::default().with_beta(400.0).with_max_generations(5);
        let mut runner = AsRunner::new(&m, config).unwrap();

        let err = runner.run().unwrap_err();
        assert!(matches!(err, MetaheurError::ZeroWeight { .. }));
        assert_eq!(runner.generation(), 0);
        // The seed tour is still reported
        assert!((runner.best_length() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_single_city() {
        let m = DistanceMatrix::new(vec![vec![0.0]]).unwrap();
        assert!(matches!(
            AsRunner::new(&m, AsConfig::default()),
            Err(MetaheurError::TooFewCities { .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_visibility() {
        // 1e-200^-2 overflows, so the edge 0 -> 1 would swallow the wheel
        let m = DistanceMatrix::new(vec![
            vec![0.0, 1e-200, 1.0, 1.0],
            vec![1e-200, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0],
        ])
        .unwrap();
        assert!(matches!(
            AsRunner::new(&m, AsConfig::default()),
            Err(MetaheurError::NonFiniteWeight { from: 0, to: 1 })
        ));
        assert!(AsRunner::new(&m, AsConfig::default().with_beta(1.0)).is_ok());
    }
}
