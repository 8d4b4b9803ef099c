//! Problem abstractions consumed by the solvers.
//!
//! - [`Distances`] / [`DistanceMatrix`]: tour problems (ACS, AS, GA)
//! - [`Objective`] / [`Bounds`]: bounded continuous problems (DE, PSO)
//!
//! Solvers only borrow these; none of them mutates the problem.

mod distance;
pub mod functions;
mod objective;

pub use distance::{validate_tour_problem, DistanceMatrix, Distances};
pub use functions::{Ackley, Sphere};
pub use objective::{validate_objective, Bounds, Direction, FnObjective, Objective};
