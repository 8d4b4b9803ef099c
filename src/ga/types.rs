//! Chromosome representation for the TSP genetic algorithm.

use crate::problem::Distances;
use crate::tour::cyclic_length;

/// A candidate tour in the GA population.
///
/// `genes` is a permutation of `0..n`; the edge from the last city back
/// to the first is implied.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    /// City visiting order.
    pub genes: Vec<usize>,

    /// Cyclic tour length, set by [`evaluate`](Chromosome::evaluate).
    pub tour_length: f64,

    /// `1 / tour_length`.
    pub fitness: f64,
}

impl Chromosome {
    /// Wraps a permutation; it must be evaluated before use.
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            tour_length: f64::INFINITY,
            fitness: 0.0,
        }
    }

    /// Recomputes tour length and fitness.
    pub fn evaluate<D: Distances + ?Sized>(&mut self, distances: &D) {
        self.tour_length = cyclic_length(distances, &self.genes);
        self.fitness = 1.0 / self.tour_length;
    }
}
