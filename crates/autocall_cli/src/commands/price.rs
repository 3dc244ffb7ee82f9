//! Price command: one engine run over a scenario.

use serde::Serialize;
use tracing::info;

use autocall_pricing::MonteCarloPricer;

use crate::commands::OutputFormat;
use crate::scenario::{Scenario, SimulationOverrides};
use crate::{CliError, Result};

/// Pricing run report.
#[derive(Debug, Serialize)]
struct PriceReport {
    fair_value: f64,
    pct_of_notional: f64,
    std_error: f64,
    confidence_95: f64,
    n_paths: usize,
    coupon_rate_pct: f64,
}

/// Runs the price command.
pub fn run(scenario_path: &str, overrides: SimulationOverrides, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let pricing = scenario.pricing.as_ref().ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "scenario {} has no [pricing] block",
            scenario_path
        ))
    })?;

    let contract = scenario.contract.contract()?;
    let config = scenario.simulation.engine_config(overrides)?;
    let coupon_rate = pricing.coupon_rate();

    info!(
        scenario = scenario_path,
        n_paths = config.n_paths(),
        workers = config.workers(),
        seed = config.seed(),
        coupon_rate,
        "pricing"
    );

    let pricer = MonteCarloPricer::new(config);
    let result = pricer.fair_value(coupon_rate, &contract, &scenario.rates)?;

    let report = PriceReport {
        fair_value: result.value,
        pct_of_notional: result.pct_of_notional(contract.notional()),
        std_error: result.std_error,
        confidence_95: result.confidence_95(),
        n_paths: result.n_paths,
        coupon_rate_pct: coupon_rate * 100.0,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("Fair value:     {:.2}", report.fair_value);
            println!("% of notional:  {:.4}%", report.pct_of_notional);
            println!(
                "Std error:      {:.2} (95% CI ±{:.2})",
                report.std_error, report.confidence_95
            );
            println!("Paths:          {}", report.n_paths);
        }
    }

    Ok(())
}
