//! Error types for the Monte Carlo pricing engine.

use autocall_core::{ConfigError, DegeneratePeriodError};
use thiserror::Error;

/// Errors raised by the pricing engine.
///
/// The engine never substitutes a default value on failure: a chunk that
/// cannot complete surfaces as [`PricingError::Worker`] to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid contract or engine configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A parallel unit of work failed.
    #[error("Worker {index} failed: {source}")]
    Worker {
        /// Index of the failed chunk.
        index: usize,
        /// The schedule error raised inside the chunk.
        source: DegeneratePeriodError,
    },
}
