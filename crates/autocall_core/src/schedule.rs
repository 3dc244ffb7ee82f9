//! Derived coupon and auto-call step schedule.
//!
//! A [`CouponSchedule`] maps the contract's coupon observation times onto the
//! discrete simulation grid: which steps pay a coupon, from which step the
//! note may auto-call, and the period boundaries used to pro-rate accrued
//! interest when a call lands between two coupon dates.

use crate::contract::ContractSpec;
use crate::error::DegeneratePeriodError;

/// Read-only view of a contract's coupon grid at a given step resolution.
///
/// Coupon times are mapped to steps by truncating `time / tenor × n_steps`.
/// The period boundaries are `{0}`, every coupon step, and the final step;
/// they must be strictly increasing, otherwise an accrual period would have
/// zero length and the schedule is rejected at derivation.
///
/// # Examples
///
/// ```rust
/// use autocall_core::{ContractSpec, CouponSchedule};
///
/// let spec = ContractSpec::builder()
///     .notional(100_000.0)
///     .initial_price(11.08)
///     .volatility(0.6039)
///     .maturity_strike_ratio(0.96)
///     .knock_in_ratio(0.92)
///     .auto_call_ratio(0.99)
///     .coupon_times(vec![
///         1.0 / 12.0,
///         2.0 / 12.0,
///         3.0 / 12.0,
///         4.0 / 12.0,
///         5.0 / 12.0,
///         0.5,
///     ])
///     .tenor(0.5)
///     .n_steps(180)
///     .build()
///     .unwrap();
///
/// let schedule = CouponSchedule::from_contract(&spec).unwrap();
/// assert_eq!(schedule.coupon_steps(), &[30, 60, 90, 120, 150, 180]);
/// assert_eq!(schedule.first_auto_call_step(), 30);
/// assert_eq!(schedule.period_boundaries(), &[0, 30, 60, 90, 120, 150, 180]);
///
/// // Half-way through the first period.
/// assert!((schedule.accrued_fraction(15) - 0.5).abs() < 1e-15);
/// // Exactly on a coupon step: a full period has accrued.
/// assert!((schedule.accrued_fraction(60) - 1.0).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CouponSchedule {
    /// Coupon observation steps, strictly increasing.
    coupon_steps: Vec<usize>,
    /// Period boundaries: 0, each coupon step, and the final step.
    boundaries: Vec<usize>,
    /// First step at which the auto-call condition may trigger.
    first_auto_call_step: usize,
    /// Total step count of the grid.
    n_steps: usize,
}

impl CouponSchedule {
    /// Derives the schedule from a contract.
    ///
    /// # Errors
    ///
    /// Returns [`DegeneratePeriodError`] if a coupon time truncates to step 0
    /// or to the same step as the preceding coupon, which would make an
    /// accrual period zero steps long.
    pub fn from_contract(contract: &ContractSpec) -> Result<Self, DegeneratePeriodError> {
        let n_steps = contract.n_steps();
        let tenor = contract.tenor();

        let mut coupon_steps = Vec::with_capacity(contract.coupon_times().len());
        let mut boundaries = Vec::with_capacity(contract.coupon_times().len() + 2);
        boundaries.push(0);

        for &time in contract.coupon_times() {
            // Truncating map onto the step grid.
            let step = (time / tenor * n_steps as f64) as usize;
            let last = *boundaries.last().expect("boundaries start at 0");
            if step <= last {
                return Err(DegeneratePeriodError {
                    coupon_time: time,
                    step,
                    n_steps,
                });
            }
            coupon_steps.push(step);
            boundaries.push(step);
        }

        // The terminal step closes the last period even when the final
        // coupon falls short of maturity.
        if *boundaries.last().expect("non-empty") < n_steps {
            boundaries.push(n_steps);
        }

        let first_auto_call_step = coupon_steps[0];

        Ok(Self {
            coupon_steps,
            boundaries,
            first_auto_call_step,
            n_steps,
        })
    }

    /// Returns the coupon observation steps.
    #[inline]
    pub fn coupon_steps(&self) -> &[usize] {
        &self.coupon_steps
    }

    /// Returns the period boundaries (0, each coupon step, final step).
    #[inline]
    pub fn period_boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Returns the first step at which the auto-call condition may trigger.
    #[inline]
    pub fn first_auto_call_step(&self) -> usize {
        self.first_auto_call_step
    }

    /// Returns the total step count of the grid.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns whether `step` is a coupon observation step.
    #[inline]
    pub fn is_coupon_step(&self, step: usize) -> bool {
        self.coupon_steps.binary_search(&step).is_ok()
    }

    /// Returns the fraction of the enclosing accrual period elapsed at `step`.
    ///
    /// The enclosing period runs from the largest boundary below `step` to
    /// the next boundary at or above it; a step exactly on a boundary has
    /// accrued a full period. Always in (0, 1] for steps in `1..=n_steps`.
    #[inline]
    pub fn accrued_fraction(&self, step: usize) -> f64 {
        debug_assert!(step >= 1 && step <= self.n_steps);
        let next = self.boundaries.partition_point(|&b| b < step);
        let preceding = self.boundaries[next - 1];
        let following = self.boundaries[next];
        (step - preceding) as f64 / (following - preceding) as f64
    }
}
