//! Particle Swarm Optimization (global-best topology) for box-bounded
//! continuous objectives.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod runner;
mod types;

pub use config::PsoConfig;
pub use runner::PsoRunner;
pub use types::Particle;
