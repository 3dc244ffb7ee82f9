//! Error types for calibration.

use autocall_core::ConfigError;
use autocall_pricing::PricingError;
use thiserror::Error;

/// Errors raised while calibrating a contract parameter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// The objective has the same sign at both bracket endpoints, so no
    /// root is guaranteed inside the bracket.
    #[error(
        "No sign change over bracket [{lo}, {hi}]: f(lo) = {f_lo:.6}, f(hi) = {f_hi:.6}; \
         widen the bracket so it straddles the target fair value"
    )]
    NoBracket {
        /// Lower bracket endpoint.
        lo: f64,
        /// Upper bracket endpoint.
        hi: f64,
        /// Objective value at the lower endpoint.
        f_lo: f64,
        /// Objective value at the upper endpoint.
        f_hi: f64,
    },

    /// The solver did not converge within its iteration budget.
    #[error("Root finding did not converge within {iterations} iterations")]
    MaxIterations {
        /// The iteration budget that was exhausted.
        iterations: usize,
    },

    /// The bracket endpoints are non-finite or coincide.
    #[error("Invalid bracket [{lo}, {hi}]: endpoints must be finite and distinct")]
    InvalidBracket {
        /// Lower bracket endpoint.
        lo: f64,
        /// Upper bracket endpoint.
        hi: f64,
    },

    /// The solver tolerance is non-positive or non-finite.
    #[error("Invalid tolerance {0}: must be positive and finite")]
    InvalidTolerance(f64),

    /// An objective evaluation failed inside the pricing engine.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl From<ConfigError> for CalibrationError {
    fn from(err: ConfigError) -> Self {
        Self::Pricing(PricingError::Config(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bracket_message_carries_endpoints() {
        let err = CalibrationError::NoBracket {
            lo: 0.8,
            hi: 0.92,
            f_lo: -120.5,
            f_hi: -80.25,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("[0.8, 0.92]"));
        assert!(msg.contains("widen the bracket"));
    }

    #[test]
    fn test_config_error_wraps_through_pricing() {
        let err: CalibrationError = ConfigError::InvalidWorkerCount(0).into();
        assert!(matches!(
            err,
            CalibrationError::Pricing(PricingError::Config(_))
        ));
    }

    #[test]
    fn test_max_iterations_message() {
        let err = CalibrationError::MaxIterations { iterations: 100 };
        assert_eq!(
            format!("{}", err),
            "Root finding did not converge within 100 iterations"
        );
    }
}
