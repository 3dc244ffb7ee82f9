//! TOML scenario files.
//!
//! A scenario bundles a contract, a rate model, and simulation settings,
//! plus the block for whichever subcommand is being run. Rates and coupon
//! brackets follow the desk convention of percent per period in files; the
//! loaders here convert to fractions before anything touches the libraries.

use std::path::Path;

use serde::Deserialize;

use autocall_core::{ContractSpec, RateModel};
use autocall_optimiser::{CalibrationTarget, FreeParameter, SolverConfig};
use autocall_pricing::EngineConfig;

use crate::{CliError, Result};

/// A parsed scenario file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Contract terms.
    pub contract: ContractSection,
    /// Rate model, tagged `type = "plain" | "quanto"`. Any other tag is
    /// rejected during parsing with the offending name.
    pub rates: RateModel,
    /// Simulation settings; every field can be overridden by a CLI flag.
    #[serde(default)]
    pub simulation: SimulationSection,
    /// Settings for the `price` subcommand.
    pub pricing: Option<PricingSection>,
    /// Settings for the `calibrate` subcommand.
    pub calibration: Option<CalibrationSection>,
}

impl Scenario {
    /// Loads and parses a scenario file.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(CliError::FileNotFound(path.to_string()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::ScenarioParse {
            path: path.to_string(),
            source: Box::new(source),
        })
    }
}

/// The `[contract]` block: raw contract terms, validated on build.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSection {
    /// Notional in settlement-currency units.
    pub notional: f64,
    /// Initial underlying price S0.
    pub initial_price: f64,
    /// Annualised volatility of the underlying.
    pub volatility: f64,
    /// Maturity strike as a fraction of S0.
    pub maturity_strike_ratio: f64,
    /// Knock-in barrier as a fraction of S0.
    pub knock_in_ratio: f64,
    /// Auto-call barrier as a fraction of S0.
    pub auto_call_ratio: f64,
    /// Coupon observation times as year fractions.
    pub coupon_times: Vec<f64>,
    /// Note tenor in years.
    pub tenor: f64,
    /// Number of discretisation steps.
    pub n_steps: usize,
}

impl ContractSection {
    /// Builds the validated contract.
    pub fn contract(&self) -> Result<ContractSpec> {
        Ok(ContractSpec::builder()
            .notional(self.notional)
            .initial_price(self.initial_price)
            .volatility(self.volatility)
            .maturity_strike_ratio(self.maturity_strike_ratio)
            .knock_in_ratio(self.knock_in_ratio)
            .auto_call_ratio(self.auto_call_ratio)
            .coupon_times(self.coupon_times.clone())
            .tenor(self.tenor)
            .n_steps(self.n_steps)
            .build()?)
    }
}

/// The `[simulation]` block.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Total path count (must be even).
    pub n_paths: Option<usize>,
    /// Worker count; defaults to the machine's CPU count.
    pub workers: Option<usize>,
    /// Base RNG seed; defaults to 0.
    pub seed: Option<u64>,
}

/// Simulation settings supplied as CLI flags, taking precedence over the
/// scenario file.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulationOverrides {
    /// `--paths` flag.
    pub n_paths: Option<usize>,
    /// `--workers` flag.
    pub workers: Option<usize>,
    /// `--seed` flag.
    pub seed: Option<u64>,
}

impl SimulationSection {
    /// Resolves the engine configuration from file values and flag
    /// overrides.
    pub fn engine_config(&self, overrides: SimulationOverrides) -> Result<EngineConfig> {
        let n_paths = overrides.n_paths.or(self.n_paths).ok_or_else(|| {
            CliError::InvalidArgument(
                "path count missing: set [simulation] n_paths or pass --paths".to_string(),
            )
        })?;
        let workers = overrides
            .workers
            .or(self.workers)
            .unwrap_or_else(num_cpus::get);
        let seed = overrides.seed.or(self.seed).unwrap_or(0);
        Ok(EngineConfig::builder()
            .n_paths(n_paths)
            .workers(workers)
            .seed(seed)
            .build()?)
    }
}

/// The `[pricing]` block.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingSection {
    /// Coupon rate in percent per period.
    pub coupon_rate_pct: f64,
}

impl PricingSection {
    /// Coupon rate as a fraction per period.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate_pct / 100.0
    }
}

/// Which contract parameter the calibration solves for.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Per-period coupon rate; bracket given in percent.
    CouponRate,
    /// Maturity strike ratio K0; bracket given as ratios.
    MaturityStrikeRatio,
    /// Knock-in barrier ratio; bracket given as ratios.
    KnockInRatio,
    /// Auto-call barrier ratio; bracket given as ratios.
    AutoCallRatio,
}

/// The `[calibration]` block.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationSection {
    /// Free parameter to solve for.
    pub parameter: ParameterKind,
    /// Search bracket; percent for `coupon_rate`, ratios otherwise.
    pub bracket: [f64; 2],
    /// Issuance margin in percent of notional; target = notional × (1 − m).
    pub margin_pct: Option<f64>,
    /// Explicit target fair value in currency units.
    pub target_value: Option<f64>,
    /// Fixed coupon rate (percent per period) for barrier/strike solves.
    pub coupon_rate_pct: Option<f64>,
    /// Solver tolerance on the parameter; defaults to 1e-5.
    pub tolerance: Option<f64>,
    /// Solver iteration budget; defaults to 100.
    pub max_iterations: Option<usize>,
}

impl CalibrationSection {
    /// Resolves the free parameter, enforcing the fixed-coupon rule: the
    /// coupon solve takes no fixed coupon, every barrier solve needs one.
    pub fn free_parameter(&self) -> Result<FreeParameter> {
        let fixed_coupon = || {
            self.coupon_rate_pct.map(|pct| pct / 100.0).ok_or_else(|| {
                CliError::InvalidArgument(
                    "barrier solves need coupon_rate_pct in [calibration]".to_string(),
                )
            })
        };
        match self.parameter {
            ParameterKind::CouponRate => {
                if self.coupon_rate_pct.is_some() {
                    return Err(CliError::InvalidArgument(
                        "coupon_rate_pct has no effect when solving for the coupon rate"
                            .to_string(),
                    ));
                }
                Ok(FreeParameter::CouponRate)
            }
            ParameterKind::MaturityStrikeRatio => Ok(FreeParameter::MaturityStrikeRatio {
                coupon_rate: fixed_coupon()?,
            }),
            ParameterKind::KnockInRatio => Ok(FreeParameter::KnockInRatio {
                coupon_rate: fixed_coupon()?,
            }),
            ParameterKind::AutoCallRatio => Ok(FreeParameter::AutoCallRatio {
                coupon_rate: fixed_coupon()?,
            }),
        }
    }

    /// Search bracket as the solver sees it (fractions for the coupon).
    pub fn solver_bracket(&self) -> (f64, f64) {
        match self.parameter {
            ParameterKind::CouponRate => (self.bracket[0] / 100.0, self.bracket[1] / 100.0),
            _ => (self.bracket[0], self.bracket[1]),
        }
    }

    /// Solver settings with defaults filled in.
    pub fn solver_config(&self) -> Result<SolverConfig> {
        let defaults = SolverConfig::default();
        Ok(SolverConfig::new(
            self.tolerance.unwrap_or(defaults.tolerance),
            self.max_iterations.unwrap_or(defaults.max_iterations),
        )?)
    }

    /// Builds the full calibration target for a contract of the given
    /// notional. Exactly one of `margin_pct` and `target_value` must be
    /// set.
    pub fn target(&self, notional: f64) -> Result<CalibrationTarget> {
        let parameter = self.free_parameter()?;
        let bracket = self.solver_bracket();
        let solver = self.solver_config()?;
        match (self.margin_pct, self.target_value) {
            (Some(margin_pct), None) => Ok(CalibrationTarget::for_margin(
                parameter,
                bracket,
                notional,
                margin_pct / 100.0,
                solver,
            )),
            (None, Some(target_value)) => {
                Ok(CalibrationTarget::new(parameter, bracket, target_value, solver))
            }
            (Some(_), Some(_)) => Err(CliError::InvalidArgument(
                "set either margin_pct or target_value in [calibration], not both".to_string(),
            )),
            (None, None) => Err(CliError::InvalidArgument(
                "set margin_pct or target_value in [calibration]".to_string(),
            )),
        }
    }
}
