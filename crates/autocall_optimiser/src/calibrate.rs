//! Calibration of one contract parameter against a target fair value.

use autocall_core::{ContractSpec, RateModel};
use autocall_pricing::MonteCarloPricer;
use tracing::info;

use crate::error::CalibrationError;
use crate::solver::BrentSolver;
use crate::target::CalibrationTarget;

/// Outcome of a calibration exercise.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalibrationResult {
    /// Solved parameter value.
    pub parameter: f64,
    /// Fair value at the solver's final objective evaluation.
    pub fair_value: f64,
    /// Residual (fair value − target) at the final evaluation.
    pub residual: f64,
    /// Number of objective evaluations, each one full pricing run.
    pub evaluations: usize,
}

/// Solves for a contract parameter by treating the Monte Carlo pricer as a
/// black-box scalar function.
///
/// Each objective evaluation is one full, blocking engine run with the
/// candidate parameter substituted; iterations are strictly sequential. The
/// objective is noisy (Monte Carlo), which Brent's method tolerates as long
/// as the bracket endpoints straddle the target.
///
/// # Examples
///
/// ```rust
/// use autocall_core::{ContractSpec, RateModel};
/// use autocall_pricing::{EngineConfig, MonteCarloPricer};
/// use autocall_optimiser::{CalibrationTarget, Calibrator, FreeParameter, SolverConfig};
///
/// let contract = ContractSpec::builder()
///     .notional(100_000.0)
///     .initial_price(11.08)
///     .volatility(0.0)
///     .maturity_strike_ratio(0.96)
///     .knock_in_ratio(0.92)
///     .auto_call_ratio(0.99)
///     .coupon_times(vec![1.0 / 12.0, 0.5])
///     .tenor(0.5)
///     .n_steps(180)
///     .build()
///     .unwrap();
/// let rates = RateModel::Plain { rate: 0.0 };
/// let pricer = MonteCarloPricer::new(
///     EngineConfig::builder().n_paths(200).workers(1).build().unwrap(),
/// );
///
/// let target = CalibrationTarget::new(
///     FreeParameter::CouponRate,
///     (0.001, 0.10),
///     102_000.0,
///     SolverConfig::default(),
/// );
/// let result = Calibrator::new(&pricer, &contract, &rates).solve(&target).unwrap();
/// assert!((result.parameter - 0.02).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Calibrator<'a> {
    pricer: &'a MonteCarloPricer,
    contract: &'a ContractSpec,
    rates: &'a RateModel,
}

impl<'a> Calibrator<'a> {
    /// Creates a calibrator over the given pricer, base contract, and rates.
    pub fn new(
        pricer: &'a MonteCarloPricer,
        contract: &'a ContractSpec,
        rates: &'a RateModel,
    ) -> Self {
        Self {
            pricer,
            contract,
            rates,
        }
    }

    /// Solves the calibration target.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::NoBracket`] if the objective does not
    /// change sign over the bracket, [`CalibrationError::MaxIterations`] on
    /// convergence failure, or the underlying pricing error if any engine
    /// run fails.
    pub fn solve(&self, target: &CalibrationTarget) -> Result<CalibrationResult, CalibrationError> {
        let notional = self.contract.notional();
        let solver = BrentSolver::new(target.solver);

        info!(
            parameter = target.parameter.name(),
            lo = target.lo,
            hi = target.hi,
            target_pct = target.target_value / notional * 100.0,
            "starting calibration"
        );

        let mut evaluations = 0usize;
        let mut last_fair_value = f64::NAN;

        let objective = |x: f64| -> Result<f64, CalibrationError> {
            let (coupon_rate, contract) = target.parameter.apply(x, self.contract)?;
            let result = self.pricer.fair_value(coupon_rate, &contract, self.rates)?;
            evaluations += 1;
            last_fair_value = result.value;

            let residual = result.value - target.target_value;
            info!(
                guess = x,
                fair_value_pct = result.value / notional * 100.0,
                residual_pct = residual / notional * 100.0,
                "calibration step"
            );
            Ok(residual)
        };

        let parameter = solver.find_root(objective, target.lo, target.hi)?;

        let result = CalibrationResult {
            parameter,
            fair_value: last_fair_value,
            residual: last_fair_value - target.target_value,
            evaluations,
        };
        info!(
            parameter = result.parameter,
            evaluations = result.evaluations,
            "calibration converged"
        );
        Ok(result)
    }
}
