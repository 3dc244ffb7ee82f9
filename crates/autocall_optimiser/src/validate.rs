//! Independent re-pricing check of a calibrated solution.

use autocall_core::{ContractSpec, RateModel};
use autocall_pricing::{MonteCarloPricer, PricingError};
use tracing::info;

/// Pass band for a validation run, in percentage points of notional.
///
/// Wide enough to absorb Monte Carlo noise at production path counts while
/// still catching a mis-transcribed coupon or barrier.
pub const VALIDATION_TOLERANCE_PCT: f64 = 0.02;

/// Result of re-pricing a note at a calibrated parameter set.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationReport {
    /// Re-priced fair value as a percentage of notional.
    pub fair_value_pct: f64,
    /// Target fair value as a percentage of notional.
    pub target_pct: f64,
    /// Absolute pricing error in percentage points of notional.
    pub error_pct: f64,
    /// Whether the error is within [`VALIDATION_TOLERANCE_PCT`].
    pub passed: bool,
}

/// Re-prices the note at a solved coupon rate and compares the fair value
/// against the calibration target.
///
/// Run with an independent seed (or a higher path count) than the
/// calibration itself so the check is not a tautology.
///
/// # Errors
///
/// Propagates any pricing failure from the engine run.
pub fn validate_solution(
    pricer: &MonteCarloPricer,
    coupon_rate: f64,
    contract: &ContractSpec,
    rates: &RateModel,
    target_value: f64,
) -> Result<ValidationReport, PricingError> {
    let notional = contract.notional();
    let result = pricer.fair_value(coupon_rate, contract, rates)?;

    let fair_value_pct = result.value / notional * 100.0;
    let target_pct = target_value / notional * 100.0;
    let error_pct = (fair_value_pct - target_pct).abs();
    let passed = error_pct <= VALIDATION_TOLERANCE_PCT;

    info!(
        coupon_rate,
        fair_value_pct, target_pct, error_pct, passed, "validation run"
    );

    Ok(ValidationReport {
        fair_value_pct,
        target_pct,
        error_pct,
        passed,
    })
}
