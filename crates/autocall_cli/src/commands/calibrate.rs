//! Calibrate command: solve a scenario's calibration target, then validate.

use serde::Serialize;
use tracing::info;

use autocall_optimiser::{validate_solution, Calibrator, ValidationReport};
use autocall_pricing::MonteCarloPricer;

use crate::commands::OutputFormat;
use crate::scenario::{Scenario, SimulationOverrides};
use crate::{CliError, Result};

/// Calibration run report.
#[derive(Debug, Serialize)]
struct CalibrateReport {
    parameter: &'static str,
    solved_value: f64,
    fair_value: f64,
    target_value: f64,
    evaluations: usize,
    validation: ValidationReport,
}

/// Runs the calibrate command.
pub fn run(scenario_path: &str, overrides: SimulationOverrides, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let calibration = scenario.calibration.as_ref().ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "scenario {} has no [calibration] block",
            scenario_path
        ))
    })?;

    let contract = scenario.contract.contract()?;
    let config = scenario.simulation.engine_config(overrides)?;
    let target = calibration.target(contract.notional())?;

    info!(
        scenario = scenario_path,
        parameter = target.parameter.name(),
        n_paths = config.n_paths(),
        workers = config.workers(),
        seed = config.seed(),
        "calibrating"
    );

    let pricer = MonteCarloPricer::new(config);
    let result = Calibrator::new(&pricer, &contract, &scenario.rates).solve(&target)?;

    // Re-price at the solved value as an independent sanity check.
    let (coupon_rate, solved_contract) = target.parameter.apply(result.parameter, &contract)?;
    let validation = validate_solution(
        &pricer,
        coupon_rate,
        &solved_contract,
        &scenario.rates,
        target.target_value,
    )?;

    let report = CalibrateReport {
        parameter: target.parameter.name(),
        solved_value: result.parameter,
        fair_value: result.fair_value,
        target_value: target.target_value,
        evaluations: result.evaluations,
        validation,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("Parameter:      {}", report.parameter);
            println!("Solved value:   {:.6}", report.solved_value);
            println!(
                "Fair value:     {:.2} (target {:.2})",
                report.fair_value, report.target_value
            );
            println!("Evaluations:    {}", report.evaluations);
            println!(
                "Validation:     {:.4}% vs {:.4}% target, error {:.4}pp -> {}",
                report.validation.fair_value_pct,
                report.validation.target_pct,
                report.validation.error_pct,
                if report.validation.passed { "PASS" } else { "FAIL" }
            );
        }
    }

    Ok(())
}
