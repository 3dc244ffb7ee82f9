//! Derivative-free root finding over a fallible objective.

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
