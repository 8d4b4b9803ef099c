//! Error types shared by all solvers.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MetaheurError>;

/// Errors reported by problem validation and solver execution.
///
/// Everything except [`MetaheurError::ZeroWeight`] is a precondition
/// violation detected before the first generation runs.
/// [`MetaheurError::NonFiniteWeight`] is raised both up front, for an
/// overflowing visibility table, and by Ant System during a generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetaheurError {
    /// The problem has no cities or no dimensions.
    #[error("problem must not be empty")]
    EmptyProblem,

    /// A distance matrix row has the wrong number of entries.
    #[error("distance matrix must be square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A distance is negative, non-finite, or a non-zero self distance.
    #[error("invalid distance {value} from city {from} to city {to}")]
    InvalidDistance { from: usize, to: usize, value: f64 },

    /// Colony and GA solvers need strictly positive off-diagonal distances.
    #[error("distance from city {from} to city {to} must be positive, got {value}")]
    NonPositiveDistance { from: usize, to: usize, value: f64 },

    /// Tour solvers need at least two cities.
    #[error("at least {required} cities required, got {actual}")]
    TooFewCities { required: usize, actual: usize },

    /// Lower and upper bound vectors differ in length.
    #[error("bounds dimension mismatch: {lower} lower bounds, {upper} upper bounds")]
    DimensionMismatch { lower: usize, upper: usize },

    /// A bound pair is inverted, non-finite, or wider than `f64` can represent.
    #[error("invalid bounds in dimension {dim}: [{lower}, {upper}]")]
    InvalidBounds { dim: usize, lower: f64, upper: f64 },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A roulette weight evaluated to zero, so no probability mass can be formed.
    #[error("zero selection weight on edge {from} -> {to}")]
    ZeroWeight { from: usize, to: usize },

    /// A selection weight overflowed, so roulette probabilities are undefined.
    #[error("selection weight on edge {from} -> {to} is not finite")]
    NonFiniteWeight { from: usize, to: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MetaheurError::ZeroWeight { from: 1, to: 3 };
        assert_eq!(err.to_string(), "zero selection weight on edge 1 -> 3");

        let err = MetaheurError::NonFiniteWeight { from: 0, to: 2 };
        assert_eq!(err.to_string(), "selection weight on edge 0 -> 2 is not finite");

        let err = MetaheurError::InvalidConfig("num_ants must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: num_ants must be at least 1"
        );
    }
}
