//! Nature-inspired metaheuristics for tour and continuous optimization.
//!
//! Provides five solvers sharing one structure (configure, initialize,
//! iterate for a fixed number of generations, track the global best):
//!
//! - **Ant Colony System (ACS)** and **Ant System (AS)**: pheromone-guided
//!   tour construction for the symmetric or asymmetric TSP.
//! - **Genetic Algorithm (GA)**: permutation GA for the TSP with roulette
//!   selection, PMX crossover and swap mutation.
//! - **Differential Evolution (DE)**: DE/rand/1/bin over box bounds.
//! - **Particle Swarm Optimization (PSO)**: global-best PSO over box bounds.
//!
//! # Architecture
//!
//! Problems are described by two traits in [`problem`]: [`problem::Distances`]
//! for tour solvers and [`problem::Objective`] for continuous solvers. Each
//! runner borrows its problem, owns its state and a seeded generator from
//! [`random`], and reports a [`result::TourResult`] or
//! [`result::VectorResult`]. The library emits `tracing` events and never
//! installs a subscriber.

pub mod aco;
pub mod best;
pub mod de;
pub mod error;
pub mod ga;
pub mod problem;
pub mod pso;
pub mod random;
pub mod result;
pub mod tour;

pub use error::{MetaheurError, Result};
