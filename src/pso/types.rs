//! Particle state.

use rand::Rng;

use super::config::PsoConfig;

/// A particle with its velocity and personal best.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,

    /// Objective value at `position`.
    pub value: f64,

    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
    pub best_value: f64,
}

impl Particle {
    /// Creates a particle whose personal best is its starting position.
    pub fn new(position: Vec<f64>, velocity: Vec<f64>, value: f64) -> Self {
        Self {
            best_position: position.clone(),
            best_value: value,
            position,
            velocity,
            value,
        }
    }

    /// Applies the velocity and position update for every dimension.
    ///
    /// `v = w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)`, clamped to
    /// `±vmax[d]`; then `x += v`, clamped into `[lower[d], upper[d]]`.
    pub(crate) fn fly<R: Rng + ?Sized>(
        &mut self,
        global_best: &[f64],
        config: &PsoConfig,
        vmax: &[f64],
        bounds: (&[f64], &[f64]),
        rng: &mut R,
    ) {
        let (lower, upper) = bounds;
        for d in 0..self.position.len() {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let x = self.position[d];
            let v = config.w * self.velocity[d]
                + config.c1 * r1 * (self.best_position[d] - x)
                + config.c2 * r2 * (global_best[d] - x);
            // Opposing pulls that both overflow cancel to NaN
            let v = if v.is_nan() { 0.0 } else { v.clamp(-vmax[d], vmax[d]) };
            self.velocity[d] = v;
            self.position[d] = (x + v).clamp(lower[d], upper[d]);
        }
    }

    /// Records `value` for the current position and updates the personal
    /// best. Returns `true` if the personal best changed.
    pub(crate) fn observe<F: Fn(f64, f64) -> bool>(&mut self, value: f64, is_fitter: F) -> bool {
        self.value = value;
        if is_fitter(value, self.best_value) {
            self.best_position.clone_from(&self.position);
            self.best_value = value;
            true
        } else {
            false
        }
    }
}
