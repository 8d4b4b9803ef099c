//! Benchmark objectives.
//!
//! - [`Sphere`]: `f(x) = Σ x_i²`, minimum 0 at the origin
//! - [`Ackley`]: multimodal, minimum 0 at the origin
//!
//! # References
//!
//! - Ackley (1987), *A Connectionist Machine for Genetic Hillclimbing*

use std::f64::consts::{E, PI};

use super::objective::{Bounds, Direction, Objective};

/// Sphere function, minimized.
#[derive(Debug, Clone)]
pub struct Sphere {
    bounds: Bounds,
}

impl Sphere {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl Objective for Sphere {
    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn lower_bounds(&self) -> &[f64] {
        self.bounds.lower()
    }

    fn upper_bounds(&self) -> &[f64] {
        self.bounds.upper()
    }
}

/// Ackley function with `a = 20`, `b = 0.2`, `c = 2π`.
///
/// The direction is configurable; benchmark use is minimization.
#[derive(Debug, Clone)]
pub struct Ackley {
    bounds: Bounds,
    direction: Direction,
}

impl Ackley {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            direction: Direction::Minimize,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl Objective for Ackley {
    fn evaluate(&self, x: &[f64]) -> f64 {
        const A: f64 = 20.0;
        const B: f64 = 0.2;
        const C: f64 = 2.0 * PI;

        let d = x.len() as f64;
        let (squares, cosines) = x
            .iter()
            .fold((0.0, 0.0), |(s, c), &v| (s + v * v, c + (C * v).cos()));

        -A * (-B * (squares / d).sqrt()).exp() - (cosines / d).exp() + A + E
    }

    fn lower_bounds(&self) -> &[f64] {
        self.bounds.lower()
    }

    fn upper_bounds(&self) -> &[f64] {
        self.bounds.upper()
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_values() {
        let f = Sphere::new(Bounds::uniform(2, -5.0, 5.0).unwrap());
        assert_eq!(f.evaluate(&[0.0, 0.0]), 0.0);
        assert_eq!(f.evaluate(&[1.0, -2.0]), 5.0);
        assert_eq!(f.dimension(), 2);
    }

    #[test]
    fn test_ackley_minimum_at_origin() {
        let f = Ackley::new(Bounds::uniform(3, -32.768, 32.768).unwrap());
        assert!(f.evaluate(&[0.0, 0.0, 0.0]).abs() < 1e-12);
        assert!(f.evaluate(&[1.0, 1.0, 1.0]) > 1.0);
        assert_eq!(f.direction(), Direction::Minimize);
    }
}
