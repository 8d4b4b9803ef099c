//! Differential Evolution (DE/rand/1/bin) for box-bounded continuous
//! objectives.
//!
//! # References
//!
//! - Storn & Price (1997), "Differential Evolution – A Simple and
//!   Efficient Heuristic for Global Optimization over Continuous Spaces"

mod config;
mod runner;

pub use config::DeConfig;
pub use runner::DeRunner;
