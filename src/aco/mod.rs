//! Ant colony algorithms for the Traveling Salesman Problem.
//!
//! Ants build complete tours city by city, guided by a pheromone matrix
//! and by inverse distance. Two variants are provided:
//!
//! - [`AcsRunner`]: Ant Colony System. Pseudo-random proportional choice
//!   (greedy with probability `q0`), a local rule after every step, and a
//!   global rule that reinforces only the best tour found so far.
//! - [`AsRunner`]: Ant System. Pure roulette choice, uniform evaporation,
//!   and deposits from every ant.
//!
//! Both require strictly positive off-diagonal distances.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Gambardella (1997), "Ant Colony System: A Cooperative
//!   Learning Approach to the Traveling Salesman Problem"

mod acs;
mod ant;
mod ant_system;
mod config;
mod pheromone;

pub use acs::AcsRunner;
pub use ant::Ant;
pub use ant_system::AsRunner;
pub use config::{AcsConfig, AsConfig};
pub use pheromone::PheromoneMatrix;
