//! Ant records and city-choice rules.

use rand::Rng;

use super::pheromone::PheromoneMatrix;
use crate::error::{MetaheurError, Result};
use crate::problem::Distances;

/// One ant's tour under construction.
///
/// After [`reset`](Ant::reset) the tour holds only the start city and
/// every other city is unvisited. Unvisited cities are kept in ascending
/// index order; this is the scan order of every choice rule.
#[derive(Debug, Clone, Default)]
pub struct Ant {
    tour: Vec<usize>,
    unvisited: Vec<usize>,
    length: f64,
}

impl Ant {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            tour: Vec::with_capacity(n + 1),
            unvisited: Vec::with_capacity(n),
            length: 0.0,
        }
    }

    /// Clears the previous tour and places the ant on `start`.
    pub(crate) fn reset(&mut self, n: usize, start: usize) {
        self.tour.clear();
        self.tour.push(start);
        self.unvisited.clear();
        self.unvisited.extend((0..n).filter(|&c| c != start));
        self.length = 0.0;
    }

    /// The tour so far; closed once construction completes.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn unvisited(&self) -> &[usize] {
        &self.unvisited
    }

    /// City the ant currently stands on.
    ///
    /// # Panics
    /// Panics if the ant has not been reset.
    pub(crate) fn current(&self) -> usize {
        self.tour[self.tour.len() - 1]
    }

    /// Moves to the unvisited city at position `pos` of [`unvisited`](Ant::unvisited).
    pub(crate) fn advance<D: Distances + ?Sized>(&mut self, pos: usize, distances: &D) {
        let from = self.current();
        let to = self.unvisited.remove(pos);
        self.length += distances.distance(from, to);
        self.tour.push(to);
    }

    /// Returns to the start city, adding the closing edge.
    pub(crate) fn close<D: Distances + ?Sized>(&mut self, distances: &D) {
        let from = self.current();
        let start = self.tour[0];
        self.length += distances.distance(from, start);
        self.tour.push(start);
    }

    /// The most recently traversed edge.
    pub(crate) fn last_edge(&self) -> Option<(usize, usize)> {
        match self.tour.as_slice() {
            [.., from, to] => Some((*from, *to)),
            _ => None,
        }
    }
}

/// Precomputed `d(i, j)^(−β)` for every directed edge.
#[derive(Debug, Clone)]
pub(crate) struct Visibility {
    n: usize,
    data: Vec<f64>,
}

impl Visibility {
    /// # Errors
    /// [`MetaheurError::NonFiniteWeight`] if `d^(−β)` overflows for an edge,
    /// e.g. a tiny distance raised to a large `β`.
    pub(crate) fn new<D: Distances + ?Sized>(distances: &D, beta: f64) -> Result<Self> {
        let n = distances.num_cities();
        let mut data = vec![0.0; n * n];
        for from in 0..n {
            for to in 0..n {
                if from != to {
                    let v = distances.distance(from, to).powf(-beta);
                    if !v.is_finite() {
                        return Err(MetaheurError::NonFiniteWeight { from, to });
                    }
                    data[from * n + to] = v;
                }
            }
        }
        Ok(Self { n, data })
    }

    #[inline]
    pub(crate) fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }
}

/// ACS pseudo-random proportional rule.
///
/// Fills `weights` with `τ · d^(−β)` for every unvisited city. With
/// probability `q0` the heaviest candidate is taken (first found on ties),
/// otherwise one is roulette-sampled. If the weights overflow the wheel
/// (non-finite sum), the heaviest candidate is taken instead. Returns a
/// position in `ant.unvisited()`.
pub(crate) fn pseudo_random_proportional<R: Rng + ?Sized>(
    ant: &Ant,
    pheromone: &PheromoneMatrix,
    visibility: &Visibility,
    q0: f64,
    weights: &mut Vec<f64>,
    rng: &mut R,
) -> usize {
    let from = ant.current();
    weights.clear();
    weights.extend(
        ant.unvisited()
            .iter()
            .map(|&to| pheromone.get(from, to) * visibility.get(from, to)),
    );

    let q: f64 = rng.random();
    if q <= q0 {
        return heaviest(weights);
    }
    let s: f64 = rng.random();
    if weights.iter().sum::<f64>().is_finite() {
        roulette(weights, s)
    } else {
        heaviest(weights)
    }
}

/// AS random proportional rule.
///
/// Weights are `τ^α · d^(−β)`. No distribution can be formed when a
/// weight is exactly zero ([`MetaheurError::ZeroWeight`]) or when a weight
/// or the weight sum is not finite ([`MetaheurError::NonFiniteWeight`]);
/// the error names the first offending edge, or the heaviest edge when
/// only the sum overflows.
pub(crate) fn random_proportional<R: Rng + ?Sized>(
    ant: &Ant,
    pheromone: &PheromoneMatrix,
    visibility: &Visibility,
    alpha: f64,
    weights: &mut Vec<f64>,
    rng: &mut R,
) -> Result<usize> {
    let from = ant.current();
    weights.clear();
    for &to in ant.unvisited() {
        let w = pheromone.get(from, to).powf(alpha) * visibility.get(from, to);
        if w == 0.0 {
            return Err(MetaheurError::ZeroWeight { from, to });
        }
        if !w.is_finite() {
            return Err(MetaheurError::NonFiniteWeight { from, to });
        }
        weights.push(w);
    }
    if !weights.iter().sum::<f64>().is_finite() {
        let to = ant.unvisited()[heaviest(weights)];
        return Err(MetaheurError::NonFiniteWeight { from, to });
    }

    let s: f64 = rng.random();
    Ok(roulette(weights, s))
}

/// Index of the largest weight; the first one wins ties.
pub(crate) fn heaviest(weights: &[f64]) -> usize {
    let mut best = 0;
    for (i, &w) in weights.iter().enumerate().skip(1) {
        if w > weights[best] {
            best = i;
        }
    }
    best
}

/// Cumulative-sum roulette over unnormalized weights.
///
/// Returns the first index whose cumulative probability reaches `s`.
/// When rounding leaves the final sum below `s`, the last index is used.
pub(crate) fn roulette(weights: &[f64], s: f64) -> usize {
    let total: f64 = weights.iter().sum();
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w / total;
        if cumulative >= s {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::DistanceMatrix;
    use crate::random::create_rng;

    fn square() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![0.0, 1.0, 2.0, 1.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 2.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_ant_lifecycle() {
        let m = square();
        let mut ant = Ant::with_capacity(4);
        ant.reset(4, 2);
        assert_eq!(ant.tour(), &[2]);
        assert_eq!(ant.unvisited(), &[0, 1, 3]);
        assert_eq!(ant.last_edge(), None);

        ant.advance(1, &m); // -> 1
        ant.advance(0, &m); // -> 0
        ant.advance(0, &m); // -> 3
        ant.close(&m);

        assert_eq!(ant.tour(), &[2, 1, 0, 3, 2]);
        assert!(ant.unvisited().is_empty());
        assert!((ant.length() - 4.0).abs() < 1e-12);
        assert_eq!(ant.last_edge(), Some((3, 2)));
    }

    #[test]
    fn test_heaviest_first_found_on_tie() {
        assert_eq!(heaviest(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(heaviest(&[5.0]), 0);
    }

    #[test]
    fn test_roulette_boundaries() {
        let w = [1.0, 1.0, 2.0];
        assert_eq!(roulette(&w, 0.0), 0);
        assert_eq!(roulette(&w, 0.25), 0);
        assert_eq!(roulette(&w, 0.26), 1);
        assert_eq!(roulette(&w, 0.5), 1);
        assert_eq!(roulette(&w, 0.99), 2);
        assert_eq!(roulette(&w, 1.0 + 1e-9), 2);
    }

    #[test]
    fn test_visibility() {
        let v = Visibility::new(&square(), 2.0).unwrap();
        assert!((v.get(0, 2) - 0.25).abs() < 1e-12);
        assert!((v.get(0, 1) - 1.0).abs() < 1e-12);
        assert_eq!(v.get(3, 3), 0.0);
    }

    #[test]
    fn test_pure_exploitation_is_greedy() {
        let m = square();
        let vis = Visibility::new(&m, 2.0).unwrap();
        let pher = PheromoneMatrix::uniform(4, 1.0);
        let mut ant = Ant::with_capacity(4);
        ant.reset(4, 0);
        let mut rng = create_rng(1);
        let mut weights = Vec::new();
        for _ in 0..50 {
            let pos = pseudo_random_proportional(&ant, &pher, &vis, 1.0, &mut weights, &mut rng);
            // candidates [1, 2, 3]: city 1 and 3 tie at distance 1, first wins
            assert_eq!(ant.unvisited()[pos], 1);
        }
    }

    #[test]
    fn test_random_proportional_zero_weight() {
        let m = square();
        let vis = Visibility::new(&m, 2.0).unwrap();
        let mut pher = PheromoneMatrix::uniform(4, 1.0);
        pher.evaporate(1.0, 0.0);
        let mut ant = Ant::with_capacity(4);
        ant.reset(4, 3);
        let mut rng = create_rng(1);
        let mut weights = Vec::new();
        let result = random_proportional(&ant, &pher, &vis, 1.0, &mut weights, &mut rng);
        assert_eq!(result, Err(MetaheurError::ZeroWeight { from: 3, to: 0 }));
    }

    #[test]
    fn test_random_proportional_picks_unvisited() {
        let m = square();
        let vis = Visibility::new(&m, 2.0).unwrap();
        let pher = PheromoneMatrix::uniform(4, 1.0);
        let mut ant = Ant::with_capacity(4);
        ant.reset(4, 0);
        let mut rng = create_rng(9);
        let mut weights = Vec::new();
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let pos =
                random_proportional(&ant, &pher, &vis, 1.0, &mut weights, &mut rng).unwrap();
            counts[pos] += 1;
        }
        // weights 1, 0.25, 1 -> the far city is picked least often
        assert!(counts[1] < counts[0] && counts[1] < counts[2], "{counts:?}");
    }

    #[test]
    fn test_visibility_rejects_overflow() {
        let m = DistanceMatrix::new(vec![
            vec![0.0, 1e-200, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();
        assert!(Visibility::new(&m, 1.0).is_ok());
        assert!(matches!(
            Visibility::new(&m, 2.0),
            Err(MetaheurError::NonFiniteWeight { from: 0, to: 1 })
        ));
    }

    #[test]
    fn test_random_proportional_rejects_overflowing_weight() {
        let m = square();
        let vis = Visibility::new(&m, 2.0).unwrap();
        let mut pher = PheromoneMatrix::uniform(4, 1.0);
        pher.deposit(0, 1, f64::MAX);
        let mut ant = Ant::with_capacity(4);
        ant.reset(4, 0);
        let mut rng = create_rng(1);
        let mut weights = Vec::new();

        // τ^α overflows on edge 0 -> 1
        let result = random_proportional(&ant, &pher, &vis, 2.0, &mut weights, &mut rng);
        assert_eq!(result, Err(MetaheurError::NonFiniteWeight { from: 0, to: 1 }));

        // Every weight is finite but the sum overflows
        pher.deposit(0, 3, f64::MAX);
        let result = random_proportional(&ant, &pher, &vis, 1.0, &mut weights, &mut rng);
        assert_eq!(result, Err(MetaheurError::NonFiniteWeight { from: 0, to: 1 }));
    }

    #[test]
    fn test_exploration_with_overflowing_sum_is_greedy() {
        let m = square();
        let vis = Visibility::new(&m, 2.0).unwrap();
        let mut pher = PheromoneMatrix::uniform(4, 1.0);
        pher.deposit(0, 3, f64::MAX);
        pher.deposit(0, 1, f64::MAX / 2.0);
        let mut ant = Ant::with_capacity(4);
        ant.reset(4, 0);
        let mut rng = create_rng(3);
        let mut weights = Vec::new();
        for _ in 0..50 {
            // q0 = 0 always explores
            let pos = pseudo_random_proportional(&ant, &pher, &vis, 0.0, &mut weights, &mut rng);
            assert_eq!(ant.unvisited()[pos], 3);
        }
    }
}
