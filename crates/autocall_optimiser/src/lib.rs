//! # autocall_optimiser: Calibration of the Autocall Note
//!
//! Calibration layer of the workspace, providing:
//! - A Brent root-finder over a fallible scalar objective (`solver`)
//! - Calibration targets over one free contract parameter (`target`)
//! - The calibrator wrapping the Monte Carlo pricer as the objective
//!   (`calibrate`)
//! - Re-pricing validation of solved parameters (`validate`)
//!
//! # Usage
//!
//! ```rust
//! use autocall_core::{ContractSpec, RateModel};
//! use autocall_pricing::{EngineConfig, MonteCarloPricer};
//! use autocall_optimiser::{CalibrationTarget, Calibrator, FreeParameter, SolverConfig};
//!
//! let contract = ContractSpec::builder()
//!     .notional(100_000.0)
//!     .initial_price(11.08)
//!     .volatility(0.0)
//!     .maturity_strike_ratio(0.96)
//!     .knock_in_ratio(0.92)
//!     .auto_call_ratio(0.99)
//!     .coupon_times(vec![1.0 / 12.0, 0.5])
//!     .tenor(0.5)
//!     .n_steps(180)
//!     .build()
//!     .unwrap();
//! let rates = RateModel::Plain { rate: 0.0 };
//!
//! let pricer = MonteCarloPricer::new(
//!     EngineConfig::builder().n_paths(200).workers(1).build().unwrap(),
//! );
//!
//! // At zero volatility the note always calls at the first coupon step, so
//! // the fair value is notional × (1 + coupon) and the coupon that prices
//! // the note at 103,000 is exactly 3%.
//! let target = CalibrationTarget::new(
//!     FreeParameter::CouponRate,
//!     (0.001, 0.10),
//!     103_000.0,
//!     SolverConfig::default(),
//! );
//! let calibrator = Calibrator::new(&pricer, &contract, &rates);
//! let result = calibrator.solve(&target).unwrap();
//! assert!((result.parameter - 0.03).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for calibration results and reports

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calibrate;
pub mod error;
pub mod solver;
pub mod target;
pub mod validate;

pub use calibrate::{CalibrationResult, Calibrator};
pub use error::CalibrationError;
pub use solver::{BrentSolver, SolverConfig};
pub use target::{CalibrationTarget, FreeParameter};
pub use validate::{validate_solution, ValidationReport, VALIDATION_TOLERANCE_PCT};
