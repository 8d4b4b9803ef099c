//! Pheromone trail storage and update rules.

/// Dense n×n matrix of pheromone intensities, one per directed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an n×n matrix with every entry set to `initial`.
    pub fn uniform(n: usize, initial: f64) -> Self {
        Self {
            n,
            data: vec![initial; n * n],
        }
    }

    pub fn num_cities(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    #[inline]
    fn entry(&mut self, from: usize, to: usize) -> &mut f64 {
        &mut self.data[from * self.n + to]
    }

    /// ACS local rule: `τ = (1 − ρ)·τ + ρ·τ0`.
    ///
    /// Pulls the edge toward `tao0`; it never overshoots for `ρ ∈ [0, 1]`.
    pub fn local_update(&mut self, from: usize, to: usize, rho: f64, tao0: f64) {
        let tau = self.entry(from, to);
        *tau = (1.0 - rho) * *tau + rho * tao0;
    }

    /// ACS global rule: `τ = (1 − α)·τ + α·Δ`.
    pub fn reinforce(&mut self, from: usize, to: usize, alpha: f64, delta: f64) {
        let tau = self.entry(from, to);
        *tau = (1.0 - alpha) * *tau + alpha * delta;
    }

    /// AS evaporation: every entry becomes `max((1 − ρ)·τ, floor)`.
    pub fn evaporate(&mut self, rho: f64, floor: f64) {
        for tau in &mut self.data {
            *tau = ((1.0 - rho) * *tau).max(floor);
        }
    }

    /// AS deposit: `τ += amount`.
    pub fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        *self.entry(from, to) += amount;
    }
}
