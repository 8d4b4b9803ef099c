//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use rand::Rng;
use tracing::{debug, info};

use super::config::GaConfig;
use super::operators::{pmx_crossover, swap_mutation};
use super::selection::roulette_select;
use super::types::Chromosome;
use crate::best::GlobalBest;
use crate::error::{MetaheurError, Result};
use crate::problem::{validate_tour_problem, Direction, Distances};
use crate::random::{create_rng, shuffle, SolverRng};
use crate::result::TourResult;
use crate::tour::{close, nearest_neighbor};

/// Genetic Algorithm for the TSP over a borrowed distance table.
///
/// # Usage
///
/// ```
/// use u_bioheur::ga::{GaConfig, GaRunner};
/// use u_bioheur::problem::DistanceMatrix;
///
/// let m = DistanceMatrix::from_points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]).unwrap();
/// let config = GaConfig::default().with_max_generations(50).with_seed(42);
/// let mut ga = GaRunner::new(&m, config).unwrap();
/// ga.run();
/// assert!((ga.best_length() - 6.0).abs() < 1e-9);
/// ```
pub struct GaRunner<'a, D: Distances + ?Sized> {
    distances: &'a D,
    config: GaConfig,
    rng: SolverRng,
    population: Vec<Chromosome>,
    best: GlobalBest<Vec<usize>>,
    generation: usize,
    history: Vec<f64>,
}

impl<'a, D: Distances + ?Sized> GaRunner<'a, D> {
    /// Validates the inputs and builds the initial population.
    ///
    /// The first [`GaConfig::greedy_count`] chromosomes are
    /// nearest-neighbor tours from random start cities; the rest are
    /// uniform shuffles.
    ///
    /// # Errors
    /// [`MetaheurError::InvalidConfig`] for bad parameters; the errors of
    /// [`validate_tour_problem`] for a malformed distance table.
    pub fn new(distances: &'a D, config: GaConfig) -> Result<Self> {
        config.validate().map_err(MetaheurError::InvalidConfig)?;
        validate_tour_problem(distances)?;

        let n = distances.num_cities();
        let mut rng = create_rng(config.seed);
        let greedy = config.greedy_count();

        let mut population = Vec::with_capacity(config.population_size);
        for _ in 0..greedy {
            let (mut tour, _) = nearest_neighbor(distances, &mut rng);
            tour.pop();
            population.push(Chromosome::new(tour));
        }
        for _ in greedy..config.population_size {
            let mut genes: Vec<usize> = (0..n).collect();
            shuffle(&mut genes, &mut rng);
            population.push(Chromosome::new(genes));
        }
        for c in &mut population {
            c.evaluate(distances);
        }

        let leader = fittest(&population);
        let best = GlobalBest::new(close(&leader.genes), leader.tour_length);
        debug!(greedy, best_length = best.quality(), "ga initial population");

        Ok(Self {
            distances,
            rng,
            population,
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
            best_length = self.best.quality(),
            "ga run complete"
        );
    }

    /// Executes a single generation.
    pub fn step(&mut self) {
        self.select();
        self.crossover();
        self.mutate();

        for c in &mut self.population {
            c.evaluate(self.distances);
        }
        self.update_best();

        self.generation += 1;
        self.history.push(self.best.quality());
        debug!(
            generation = self.generation,
            best_length = self.best.quality(),
            "ga generation"
        );
    }

    /// Replaces the population with roulette-selected copies.
    fn select(&mut self) {
        let fitness: Vec<f64> = self.population.iter().map(|c| c.fitness).collect();
        let picks = roulette_select(&fitness, self.config.population_size, &mut self.rng);
        self.population = picks
            .into_iter()
            .map(|i| self.population[i].clone())
            .collect();
    }

    /// Pairs crossover participants in population order; an unpaired
    /// last participant is left unchanged.
    fn crossover(&mut self) {
        let mut pending: Option<usize> = None;
        for i in 0..self.population.len() {
            if self.rng.random::<f64>() >= self.config.crossover_rate {
                continue;
            }
            match pending.take() {
                None => pending = Some(i),
                Some(mate) => {
                    let (c1, c2) = pmx_crossover(
                        &self.population[mate].genes,
                        &self.population[i].genes,
                        &mut self.rng,
                    );
                    self.population[mate].genes = c1;
                    self.population[i].genes = c2;
                }
            }
        }
    }

    fn mutate(&mut self) {
        for c in &mut self.population {
            if self.rng.random::<f64>() < self.config.mutation_rate {
                swap_mutation(&mut c.genes, &mut self.rng);
            }
        }
    }

    fn update_best(&mut self) {
        let leader = fittest(&self.population);
        self.best.replace_if_fitter(
            close(&leader.genes).as_slice(),
            leader.tour_length,
            |a, b| Direction::Minimize.is_fitter(a, b),
        );
    }

    /// Best closed tour found so far.
    pub fn best_tour(&self) -> &[usize] {
        self.best.encoding()
    }

    pub fn best_length(&self) -> f64 {
        self.best.quality()
    }

    /// Current population (evaluated).
    pub fn population(&self) -> &[Chromosome] {
        &self.population
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

/// Shortest chromosome; the first one wins ties.
fn fittest(population: &[Chromosome]) -> &Chromosome {
    let mut leader = &population[0];
    for c in &population[1..] {
        if c.tour_length < leader.tour_length {
            leader = c;
        }
    }
    leader
}
