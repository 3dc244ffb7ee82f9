//! Calibration targets: one free parameter, a bracket, and a target value.

use autocall_core::{ConfigError, ContractSpec};

use crate::solver::SolverConfig;

/// The contract parameter a calibration exercise solves for.
///
/// Barrier and strike solves hold the coupon rate fixed (typically a solved
/// coupon less a concession) while varying the contract field; the coupon
/// solve varies the pricer's coupon argument directly.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FreeParameter {
    /// Solve for the per-period coupon rate (as a fraction).
    CouponRate,
    /// Solve for the maturity strike ratio K0 at a fixed coupon rate.
    MaturityStrikeRatio {
        /// Coupon rate to price with, as a fraction per period.
        coupon_rate: f64,
    },
    /// Solve for the knock-in barrier ratio KI at a fixed coupon rate.
    KnockInRatio {
        /// Coupon rate to price with, as a fraction per period.
        coupon_rate: f64,
    },
    /// Solve for the auto-call barrier ratio AC at a fixed coupon rate.
    AutoCallRatio {
        /// Coupon rate to price with, as a fraction per period.
        coupon_rate: f64,
    },
}

impl FreeParameter {
    /// Materialises a candidate value `x` of this parameter as the
    /// `(coupon_rate, contract)` pair to price.
    ///
    /// Contract overrides construct a re-validated copy; the base contract
    /// is never mutated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the overridden contract fails validation.
    pub fn apply(&self, x: f64, base: &ContractSpec) -> Result<(f64, ContractSpec), ConfigError> {
        match *self {
            Self::CouponRate => Ok((x, base.clone())),
            Self::MaturityStrikeRatio { coupon_rate } => {
                Ok((coupon_rate, base.with_maturity_strike_ratio(x)?))
            }
            Self::KnockInRatio { coupon_rate } => Ok((coupon_rate, base.with_knock_in_ratio(x)?)),
            Self::AutoCallRatio { coupon_rate } => Ok((coupon_rate, base.with_auto_call_ratio(x)?)),
        }
    }

    /// Returns the parameter's name for logging and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CouponRate => "coupon_rate",
            Self::MaturityStrikeRatio { .. } => "maturity_strike_ratio",
            Self::KnockInRatio { .. } => "knock_in_ratio",
            Self::AutoCallRatio { .. } => "auto_call_ratio",
        }
    }
}

/// One calibration exercise: find the parameter value at which the note
/// prices to the target fair value.
///
/// Created per exercise, consumed by
/// [`Calibrator::solve`](crate::Calibrator::solve), and discarded once a
/// root is found or the bracket fails.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalibrationTarget {
    /// The free parameter being solved for.
    pub parameter: FreeParameter,
    /// Lower bracket endpoint.
    pub lo: f64,
    /// Upper bracket endpoint.
    pub hi: f64,
    /// Target fair value in notional-currency units.
    pub target_value: f64,
    /// Root-finder settings.
    pub solver: SolverConfig,
}

impl CalibrationTarget {
    /// Creates a target for an explicit fair value.
    pub fn new(
        parameter: FreeParameter,
        bracket: (f64, f64),
        target_value: f64,
        solver: SolverConfig,
    ) -> Self {
        Self {
            parameter,
            lo: bracket.0,
            hi: bracket.1,
            target_value,
            solver,
        }
    }

    /// Creates a target from an issuance margin: the note should price at
    /// `notional × (1 − margin)`.
    pub fn for_margin(
        parameter: FreeParameter,
        bracket: (f64, f64),
        notional: f64,
        margin: f64,
        solver: SolverConfig,
    ) -> Self {
        Self::new(parameter, bracket, notional * (1.0 - margin), solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ContractSpec {
        ContractSpec::builder()
            .notional(100_000.0)
            .initial_price(11.08)
            .volatility(0.6039)
            .maturity_strike_ratio(0.96)
            .knock_in_ratio(0.92)
            .auto_call_ratio(0.99)
            .coupon_times(vec![0.25, 0.5])
            .tenor(0.5)
            .n_steps(180)
            .build()
            .unwrap()
    }

    #[test]
    fn test_coupon_rate_passes_contract_through() {
        let base = base();
        let (coupon, contract) = FreeParameter::CouponRate.apply(0.034, &base).unwrap();
        assert_eq!(coupon, 0.034);
        assert_eq!(contract, base);
    }

    #[test]
    fn test_strike_override_keeps_fixed_coupon() {
        let base = base();
        let parameter = FreeParameter::MaturityStrikeRatio { coupon_rate: 0.0336 };
        let (coupon, contract) = parameter.apply(0.946917, &base).unwrap();
        assert_eq!(coupon, 0.0336);
        assert!((contract.maturity_strike_ratio() - 0.946917).abs() < 1e-12);
        assert_eq!(contract.knock_in_ratio(), base.knock_in_ratio());
    }

    #[test]
    fn test_knock_in_override() {
        let base = base();
        let parameter = FreeParameter::KnockInRatio { coupon_rate: 0.0336 };
        let (_, contract) = parameter.apply(0.657667, &base).unwrap();
        assert!((contract.knock_in_ratio() - 0.657667).abs() < 1e-12);
    }

    #[test]
    fn test_auto_call_override() {
        let base = base();
        let parameter = FreeParameter::AutoCallRatio { coupon_rate: 0.0336 };
        let (_, contract) = parameter.apply(0.981261, &base).unwrap();
        assert!((contract.auto_call_ratio() - 0.981261).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let base = base();
        let parameter = FreeParameter::MaturityStrikeRatio { coupon_rate: 0.03 };
        assert!(parameter.apply(-0.5, &base).is_err());
    }

    #[test]
    fn test_margin_target_value() {
        let target = CalibrationTarget::for_margin(
            FreeParameter::CouponRate,
            (1e-4, 0.10),
            100_000.0,
            0.012,
            SolverConfig::default(),
        );
        assert!((target.target_value - 98_800.0).abs() < 1e-9);
    }

    #[test]
    fn test_parameter_names() {
        assert_eq!(FreeParameter::CouponRate.name(), "coupon_rate");
        assert_eq!(
            FreeParameter::KnockInRatio { coupon_rate: 0.03 }.name(),
            "knock_in_ratio"
        );
    }
}
