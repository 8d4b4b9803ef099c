//! Distance tables for tour problems.

use crate::error::{MetaheurError, Result};

/// Read-only distance table over a fixed set of cities.
///
/// Distances may be asymmetric. Implementations must return `0.0` for
/// `distance(i, i)`.
pub trait Distances: Send + Sync {
    /// Number of cities in the table.
    fn num_cities(&self) -> usize;

    /// Distance travelled from city `from` to city `to`.
    fn distance(&self, from: usize, to: usize) -> f64;
}

/// Dense n×n distance matrix.
///
/// # Examples
///
/// ```
/// use u_bioheur::problem::{DistanceMatrix, Distances};
///
/// let m = DistanceMatrix::new(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 4.0],
///     vec![2.0, 4.0, 0.0],
/// ]).unwrap();
/// assert_eq!(m.num_cities(), 3);
/// assert_eq!(m.distance(1, 2), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from rows.
    ///
    /// Rejects empty or non-square input, negative or non-finite entries,
    /// and non-zero self distances.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(MetaheurError::EmptyProblem);
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(MetaheurError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                let self_loop_nonzero = i == j && value != 0.0;
                if !value.is_finite() || value < 0.0 || self_loop_nonzero {
                    return Err(MetaheurError::InvalidDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
            }
            data.extend(row);
        }

        Ok(Self { n, data })
    }

    /// Builds a symmetric Euclidean matrix from 2-D coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        if points.is_empty() {
            return Err(MetaheurError::EmptyProblem);
        }
        let rows = points
            .iter()
            .map(|&(xi, yi)| {
                points
                    .iter()
                    .map(|&(xj, yj)| (xi - xj).hypot(yi - yj))
                    .collect()
            })
            .collect();
        Self::new(rows)
    }
}

impl Distances for DistanceMatrix {
    fn num_cities(&self) -> usize {
        self.n
    }

    #[inline]
    fn distance(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }
}

/// Checks the preconditions shared by the tour solvers.
///
/// The table needs at least two cities and strictly positive, finite
/// off-diagonal distances so that `d^-beta` and `1 / length` stay finite.
pub fn validate_tour_problem<D: Distances + ?Sized>(distances: &D) -> Result<()> {
    let n = distances.num_cities();
    if n == 0 {
        return Err(MetaheurError::EmptyProblem);
    }
    if n < 2 {
        return Err(MetaheurError::TooFewCities {
            required: 2,
            actual: n,
        });
    }
    for from in 0..n {
        for to in 0..n {
            if from == to {
                continue;
            }
            let value = distances.distance(from, to);
            if !(value > 0.0 && value.is_finite()) {
                return Err(MetaheurError::NonPositiveDistance { from, to, value });
            }
        }
    }
    Ok(())
}
