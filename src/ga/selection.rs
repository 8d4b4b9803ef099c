//! Fitness-proportionate (roulette wheel) selection.
//!
//! Fitness is `1 / tour_length`, so shorter tours occupy a larger slice
//! of the wheel. The wheel is stored as cumulative normalized fitness.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use rand::Rng;

/// Cumulative normalized fitness: `cumulative[i] = Σ_{k ≤ i} f_k / Σ f`.
///
/// The last entry is 1 up to rounding.
pub fn cumulative_probabilities(fitness: &[f64]) -> Vec<f64> {
    let total: f64 = fitness.iter().sum();
    let mut acc = 0.0;
    fitness
        .iter()
        .map(|&f| {
            acc += f / total;
            acc
        })
        .collect()
}

/// Returns the first index with `r < cumulative[i]`.
///
/// Falls back to the last index when rounding leaves the wheel short of `r`.
pub fn spin(cumulative: &[f64], r: f64) -> usize {
    cumulative
        .iter()
        .position(|&c| r < c)
        .unwrap_or_else(|| cumulative.len().saturating_sub(1))
}

/// Draws `count` indices independently, with replacement.
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn roulette_select<R: Rng + ?Sized>(fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    assert!(!fitness.is_empty(), "cannot select from empty population");
    let wheel = cumulative_probabilities(fitness);
    (0..count)
        .map(|_| {
            let r: f64 = rng.random();
            spin(&wheel, r)
        })
        .collect()
}
