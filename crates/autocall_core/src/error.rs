//! Error types for contract and engine configuration.
//!
//! This module provides:
//! - `ConfigError`: Invalid contract terms or simulation configuration
//! - `DegeneratePeriodError`: A coupon schedule whose accrual periods
//!   collapse to zero length at the configured step resolution

use thiserror::Error;

/// Configuration errors raised when building contract terms or engine
/// settings.
///
/// These errors occur at construction time; once a value is built it is
/// valid for the life of a pricing run.
///
/// # Variants
/// - `InvalidParameter`: A scalar field is missing, non-finite, or out of range
/// - `EmptyCouponTimes`: The coupon observation grid is empty
/// - `NonIncreasingCouponTimes`: Coupon times are not strictly increasing
/// - `CouponTimeOutOfRange`: A coupon time lies outside (0, tenor]
/// - `InvalidPathCount`: Total path count is zero or odd
/// - `InvalidWorkerCount`: Worker count is zero
///
/// # Examples
/// ```
/// use autocall_core::ConfigError;
///
/// let err = ConfigError::InvalidPathCount(7);
/// assert_eq!(
///     format!("{}", err),
///     "Invalid path count 7: must be a non-zero even number (antithetic pairs)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A scalar parameter is missing, non-finite, or out of range.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// The coupon observation grid is empty.
    #[error("Coupon times must not be empty")]
    EmptyCouponTimes,

    /// Coupon times are not strictly increasing.
    #[error("Coupon times must be strictly increasing: t[{index}] = {current} follows {previous}")]
    NonIncreasingCouponTimes {
        /// Index of the offending coupon time.
        index: usize,
        /// The preceding coupon time.
        previous: f64,
        /// The offending coupon time.
        current: f64,
    },

    /// A coupon time lies outside the half-open interval (0, tenor].
    #[error("Coupon time t[{index}] = {value} outside valid range (0, {tenor}]")]
    CouponTimeOutOfRange {
        /// Index of the offending coupon time.
        index: usize,
        /// The offending coupon time.
        value: f64,
        /// Contract tenor in years.
        tenor: f64,
    },

    /// Total path count is zero or odd (antithetic pairing needs an even count).
    #[error("Invalid path count {0}: must be a non-zero even number (antithetic pairs)")]
    InvalidPathCount(usize),

    /// Worker count is zero.
    #[error("Invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),
}

/// A derived accrual period of zero length.
///
/// Raised when a coupon time truncates to the same discrete step as the
/// preceding period boundary (including step 0), so the accrued-interest
/// fraction would divide by zero. This is a loud failure by design: the
/// schedule is unusable at the configured resolution.
///
/// # Examples
/// ```
/// use autocall_core::DegeneratePeriodError;
///
/// let err = DegeneratePeriodError { coupon_time: 0.001, step: 0, n_steps: 180 };
/// assert!(format!("{}", err).contains("zero-length accrual period"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Coupon time {coupon_time} maps to step {step} of {n_steps}, creating a \
     zero-length accrual period; increase the step count or space the coupon times"
)]
pub struct DegeneratePeriodError {
    /// The coupon time (year fraction) that collapsed.
    pub coupon_time: f64,
    /// The discrete step the coupon time truncated to.
    pub step: usize,
    /// Total step count of the schedule.
    pub n_steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = ConfigError::InvalidParameter {
            name: "notional",
            value: "must be positive and finite, got -1".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'notional': must be positive and finite, got -1"
        );
    }

    #[test]
    fn test_non_increasing_coupon_times_display() {
        let err = ConfigError::NonIncreasingCouponTimes {
            index: 2,
            previous: 0.25,
            current: 0.25,
        };
        assert_eq!(
            format!("{}", err),
            "Coupon times must be strictly increasing: t[2] = 0.25 follows 0.25"
        );
    }

    #[test]
    fn test_coupon_time_out_of_range_display() {
        let err = ConfigError::CouponTimeOutOfRange {
            index: 0,
            value: 0.75,
            tenor: 0.5,
        };
        assert_eq!(
            format!("{}", err),
            "Coupon time t[0] = 0.75 outside valid range (0, 0.5]"
        );
    }

    #[test]
    fn test_invalid_worker_count_display() {
        let err = ConfigError::InvalidWorkerCount(0);
        assert_eq!(
            format!("{}", err),
            "Invalid worker count 0: at least one worker is required"
        );
    }

    #[test]
    fn test_degenerate_period_display() {
        let err = DegeneratePeriodError {
            coupon_time: 0.2501,
            step: 90,
            n_steps: 180,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("step 90 of 180"));
        assert!(msg.contains("zero-length accrual period"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ConfigError::EmptyCouponTimes;
        let _: &dyn std::error::Error = &err;

        let err = DegeneratePeriodError {
            coupon_time: 0.1,
            step: 0,
            n_steps: 10,
        };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = ConfigError::InvalidPathCount(3);
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
