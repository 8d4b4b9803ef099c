//! Genetic Algorithm for the Traveling Salesman Problem.
//!
//! Chromosomes are permutations of the cities. Each generation applies
//! roulette-wheel selection, Partially Mapped Crossover and swap mutation,
//! then re-evaluates every chromosome by its cyclic tour length.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, rates, greedy seeding)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`Chromosome`]: A permutation with its length and fitness
//!
//! # Submodules
//!
//! - [`operators`]: PMX crossover and swap mutation
//! - [`selection`]: Fitness-proportionate selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use runner::GaRunner;
pub use types::Chromosome;
