//! Solver configuration.

use crate::error::CalibrationError;

/// Configuration for the bracketed root finder.
///
/// The tolerance bounds both the bracket half-width and the residual at
/// which the solver stops. For a Monte Carlo objective the residual never
/// reaches a tight tolerance, so in practice convergence is declared on the
/// bracket width.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolverConfig {
    /// Convergence tolerance on the bracket half-width and residual.
    pub tolerance: f64,
    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// Default tolerance 1e-5 on the parameter, 100 iterations.
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with the given tolerance and iteration budget.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidTolerance`] if the tolerance is
    /// non-positive or non-finite, or [`CalibrationError::MaxIterations`]
    /// with a zero budget.
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self, CalibrationError> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(CalibrationError::InvalidTolerance(tolerance));
        }
        if max_iterations == 0 {
            return Err(CalibrationError::MaxIterations { iterations: 0 });
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }
}
