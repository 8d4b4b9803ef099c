//! Global-best PSO execution loop.
//!
//! Particles are updated one after another; a particle that improves the
//! global best is immediately followed by the rest of the swarm in the
//! same generation.

use tracing::{debug, info};

use super::config::PsoConfig;
use super::types::Particle;
use crate::best::GlobalBest;
use crate::error::{MetaheurError, Result};
use crate::problem::{validate_objective, Objective};
use crate::random::{create_rng, uniform, SolverRng};
use crate::result::VectorResult;

/// Particle Swarm Optimizer over a borrowed objective.
///
/// # Usage
///
/// ```
/// use u_bioheur::problem::{Bounds, Sphere};
/// use u_bioheur::pso::{PsoConfig, PsoRunner};
///
/// let sphere = Sphere::new(Bounds::uniform(2, -5.0, 5.0).unwrap());
/// let config = PsoConfig::default().with_max_generations(100).with_seed(3);
/// let mut pso = PsoRunner::new(&sphere, config).unwrap();
/// let initial = pso.best_value();
/// pso.run();
/// assert!(pso.best_value() <= initial);
/// ```
pub struct PsoRunner<'a, O: Objective + ?Sized> {
    objective: &'a O,
    config: PsoConfig,
    rng: SolverRng,
    vmax: Vec<f64>,
    swarm: Vec<Particle>,
    best: GlobalBest<Vec<f64>>,
    generation: usize,
    history: Vec<f64>,
}

impl<'a, O: Objective + ?Sized> PsoRunner<'a, O> {
    /// Validates the inputs and scatters the swarm.
    ///
    /// # Errors
    /// [`MetaheurError::InvalidConfig`] for bad parameters; the errors of
    /// [`validate_objective`] for malformed bounds.
    pub fn new(objective: &'a O, config: PsoConfig) -> Result<Self> {
        config.validate().map_err(MetaheurError::InvalidConfig)?;
        validate_objective(objective)?;

        let mut rng = create_rng(config.seed);
        let lower = objective.lower_bounds();
        let upper = objective.upper_bounds();
        let vmax: Vec<f64> = lower
            .iter()
            .zip(upper)
            .map(|(&lo, &hi)| config.vmax_percent * (hi - lo))
            .collect();

        let swarm: Vec<Particle> = (0..config.swarm_size)
            .map(|_| {
                let position: Vec<f64> = lower
                    .iter()
                    .zip(upper)
                    .map(|(&lo, &hi)| uniform(lo, hi, &mut rng))
                    .collect();
                let velocity: Vec<f64> = vmax.iter().map(|&v| uniform(-v, v, &mut rng)).collect();
                let value = objective.evaluate(&position);
                Particle::new(position, velocity, value)
            })
            .collect();

        let mut leader = &swarm[0];
        for p in &swarm[1..] {
            if objective.is_fitter(p.best_value, leader.best_value) {
                leader = p;
            }
        }
        let best = GlobalBest::new(leader.best_position.clone(), leader.best_value);
        debug!(best_value = best.quality(), "pso initial swarm");

        Ok(Self {
            objective,
            rng,
            vmax,
            swarm,
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
            "pso run complete"
        );
    }

    /// Executes a single generation.
    pub fn step(&mut self) {
        let objective = self.objective;
        let bounds = (objective.lower_bounds(), objective.upper_bounds());
        let is_fitter = |a: f64, b: f64| objective.is_fitter(a, b);

        for particle in &mut self.swarm {
            particle.fly(
                self.best.encoding(),
                &self.config,
                &self.vmax,
                bounds,
                &mut self.rng,
            );
            let value = objective.evaluate(&particle.position);
            if particle.observe(value, is_fitter) {
                self.best
                    .replace_if_fitter(particle.best_position.as_slice(), value, is_fitter);
            }
        }

        self.generation += 1;
        self.history.push(self.best.quality());
        debug!(
            generation = self.generation,
            best_value = self.best.quality(),
            "pso generation"
        );
    }

    pub fn best_position(&self) -> &[f64] {
        self.best.encoding()
    }

    pub fn best_value(&self) -> f64 {
        self.best.quality()
    }

    pub fn swarm(&self) -> &[Particle] {
        &self.swarm
    }

    /// Velocity limit per dimension.
    pub fn vmax(&self) -> &[f64] {
        &self.vmax
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Ackley, Bounds, Direction, FnObjective, Sphere};

    fn sphere_2d() -> Sphere {
        Sphere::new(Bounds::uniform(2, -5.0, 5.0).unwrap())
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let bounds = Bounds::new(vec![-5.0, 0.0], vec![5.0, 1.0]).unwrap();
        let sphere = Sphere::new(bounds.clone());
        let mut pso = PsoRunner::new(&sphere, PsoConfig::default().with_seed(1)).unwrap();
        for _ in 0..100 {
            pso.step();
            for p in pso.swarm() {
                assert!(bounds.contains(&p.position), "out of bounds: {:?}", p.position);
                for (v, vmax) in p.velocity.iter().zip(pso.vmax()) {
                    assert!(v.abs() <= *vmax);
                }
            }
        }
    }

    #[test]
    fn test_personal_bests_never_worsen() {
        let sphere = sphere_2d();
        let mut pso = PsoRunner::new(&sphere, PsoConfig::default().with_seed(2)).unwrap();
        let mut previous: Vec<f64> = pso.swarm().iter().map(|p| p.best_value).collect();
        for _ in 0..100 {
            pso.step();
            for (p, prev) in pso.swarm().iter().zip(&mut previous) {
                assert!(p.best_value <= *prev);
                assert!((sphere.evaluate(&p.best_position) - p.best_value).abs() < 1e-12);
                *prev = p.best_value;
            }
        }
    }

    #[test]
    fn test_global_best_matches_swarm() {
        let sphere = sphere_2d();
        let mut pso = PsoRunner::new(&sphere, PsoConfig::default().with_seed(4)).unwrap();
        for _ in 0..30 {
            pso.step();
            let swarm_best = pso
                .swarm()
                .iter()
                .map(|p| p.best_value)
                .fold(f64::INFINITY, f64::min);
            assert_eq!(pso.best_value(), swarm_best);
        }
    }

    #[test]
    fn test_sphere_improves() {
        let sphere = sphere_2d();
        let config = PsoConfig::default().with_max_generations(200).with_seed(5);
        let mut pso = PsoRunner::new(&sphere, config).unwrap();
        let initial = pso.best_value();
        pso.run();
        assert!(pso.best_value() < initial);
        assert_eq!(pso.history().len(), 201);
        for window in pso.history().windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let ackley = Ackley::new(Bounds::uniform(3, -32.0, 32.0).unwrap());
        let config = PsoConfig::default().with_max_generations(50).with_seed(6);
        let mut a = PsoRunner::new(&ackley, config.clone()).unwrap();
        let mut b = PsoRunner::new(&ackley, config).unwrap();
        a.run();
        b.run();
        assert_eq!(a.result(), b.result());
    }

    #[test]
    fn test_maximize_direction() {
        let bounds = Bounds::uniform(1, -2.0, 2.0).unwrap();
        let objective = FnObjective::new(bounds, Direction::Maximize, |x: &[f64]| -x[0].abs());
        let config = PsoConfig::default().with_max_generations(100);
        let mut pso = PsoRunner::new(&objective, config).unwrap();
        pso.run();
        for window in pso.history().windows(2) {
            assert!(window[1] >= window[0]);
        }
        assert!(pso.best_value() > -0.05);
    }

    struct Mismatched;

    impl Objective for Mismatched {
        fn evaluate(&self, x: &[f64]) -> f64 {
            x.iter().sum()
        }
        fn lower_bounds(&self) -> &[f64] {
            &[0.0, 0.0]
        }
        fn upper_bounds(&self) -> &[f64] {
            &[1.0]
        }
    }

    #[test]
    fn test_rejects_mismatched_bounds() {
        assert!(matches!(
            PsoRunner::new(&Mismatched, PsoConfig::default()),
            Err(MetaheurError::DimensionMismatch { lower: 2, upper: 1 })
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let sphere = sphere_2d();
        assert!(matches!(
            PsoRunner::new(&sphere, PsoConfig::default().with_swarm_size(0)),
            Err(MetaheurError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_widest_bounds_do_not_panic() {
        assert!(matches!(
            Bounds::uniform(1, -1e308, 1e308),
            Err(MetaheurError::InvalidBounds { .. })
        ));

        let bounds = Bounds::uniform(2, -8e307, 8e307).unwrap();
        let sphere = Sphere::new(bounds.clone());
        let config = PsoConfig::default().with_vmax_percent(1.0).with_seed(3);
        let mut pso = PsoRunner::new(&sphere, config).unwrap();
        for _ in 0..20 {
            pso.step();
            for p in pso.swarm() {
                assert!(bounds.contains(&p.position), "out of bounds: {:?}", p.position);
                assert!(p.velocity.iter().all(|v| v.is_finite()));
            }
        }
    }
}
