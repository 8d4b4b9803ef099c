//! Bounded real-valued objectives for DE and PSO.

use crate::error::{MetaheurError, Result};

/// Optimization direction.
///
/// Encapsulates the "is A fitter than B" comparison so solvers never
/// assume minimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower values are fitter.
    #[default]
    Minimize,
    /// Higher values are fitter.
    Maximize,
}

impl Direction {
    /// Returns `true` if `a` is strictly fitter than `b`.
    #[inline]
    pub fn is_fitter(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }
}

/// Per-dimension box constraints `[lower[d], upper[d]]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds, rejecting empty, mismatched, inverted or non-finite input.
    ///
    /// `upper[d] − lower[d]` must itself be finite.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        validate_bounds(&lower, &upper)?;
        Ok(Self { lower, upper })
    }

    /// Same interval in every dimension.
    pub fn uniform(dimension: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(vec![lower; dimension], vec![upper; dimension])
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Returns `true` if every coordinate of `x` lies within the bounds.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }
}

/// A bounded objective function.
///
/// # Examples
///
/// ```
/// use u_bioheur::problem::{Bounds, Direction, Objective};
///
/// struct Height { bounds: Bounds }
///
/// impl Objective for Height {
///     fn evaluate(&self, x: &[f64]) -> f64 { -(x[0] * x[0]) }
///     fn lower_bounds(&self) -> &[f64] { self.bounds.lower() }
///     fn upper_bounds(&self) -> &[f64] { self.bounds.upper() }
///     fn direction(&self) -> Direction { Direction::Maximize }
/// }
///
/// let h = Height { bounds: Bounds::uniform(1, -1.0, 1.0).unwrap() };
/// assert!(h.is_fitter(0.0, -1.0));
/// ```
pub trait Objective: Send + Sync {
    /// Objective value of a feasible vector.
    fn evaluate(&self, x: &[f64]) -> f64;

    fn lower_bounds(&self) -> &[f64];

    fn upper_bounds(&self) -> &[f64];

    /// Number of decision variables.
    fn dimension(&self) -> usize {
        self.lower_bounds().len()
    }

    /// Whether lower or higher values are fitter. Defaults to minimization.
    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    /// Returns `true` if value `a` is strictly fitter than value `b`.
    fn is_fitter(&self, a: f64, b: f64) -> bool {
        self.direction().is_fitter(a, b)
    }
}

/// Objective backed by a closure.
pub struct FnObjective<F> {
    bounds: Bounds,
    direction: Direction,
    f: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(bounds: Bounds, direction: Direction, f: F) -> Self {
        Self {
            bounds,
            direction,
            f,
        }
    }

    /// Minimizes `f` over `bounds`.
    pub fn minimize(bounds: Bounds, f: F) -> Self {
        Self::new(bounds, Direction::Minimize, f)
    }

    /// Maximizes `f` over `bounds`.
    pub fn maximize(bounds: Bounds, f: F) -> Self {
        Self::new(bounds, Direction::Maximize, f)
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        (self.f)(x)
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

/// Validates a pair of bound vectors.
pub(crate) fn validate_bounds(lower: &[f64], upper: &[f64]) -> Result<()> {
    if lower.len() != upper.len() {
        return Err(MetaheurError::DimensionMismatch {
            lower: lower.len(),
            upper: upper.len(),
        });
    }
    if lower.is_empty() {
        return Err(MetaheurError::EmptyProblem);
    }
    for (dim, (&lo, &hi)) in lower.iter().zip(upper).enumerate() {
        if !lo.is_finite() || !hi.is_finite() || lo > hi || !(hi - lo).is_finite() {
            return Err(MetaheurError::InvalidBounds {
                dim,
                lower: lo,
                upper: hi,
            });
        }
    }
    Ok(())
}

/// Validates the bounds an objective exposes.
pub fn validate_objective<O: Objective + ?Sized>(objective: &O) -> Result<()> {
    let lower = objective.lower_bounds();
    let upper = objective.upper_bounds();
    validate_bounds(lower, upper)?;
    if objective.dimension() != lower.len() {
        return Err(MetaheurError::DimensionMismatch {
            lower: objective.dimension(),
            upper: lower.len(),
        });
    }
    Ok(())
}
