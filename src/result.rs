//! Run results reported by the solvers.

/// Result of a tour solver (ACS, AS, GA).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourResult {
    /// Best tour, closed: the first city is repeated at the end.
    pub tour: Vec<usize>,

    /// Length of `tour`, including the closing edge.
    pub length: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Best length after initialization and after each generation.
    pub length_history: Vec<f64>,
}

/// Result of a continuous solver (DE, PSO).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorResult {
    /// Best position found.
    pub position: Vec<f64>,

    /// Objective value of `position`.
    pub value: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Best value after initialization and after each generation.
    pub value_history: Vec<f64>,
}
