//! # autocall_pricing: Monte Carlo Engine for the Autocall Note
//!
//! Simulation layer of the workspace, providing:
//! - Seeded standard-normal shock generation (`rng`)
//! - Euler path generation under the lognormal drift-diffusion model (`paths`)
//! - The auto-call/coupon/knock-in payoff state machine (`payoff`)
//! - Antithetic pair accumulation within one unit of work (`chunk`)
//! - The parallel reduction engine and its configuration (`engine`, `config`)
//!
//! # Usage
//!
//! ```rust
//! use autocall_core::{ContractSpec, RateModel};
//! use autocall_pricing::{EngineConfig, MonteCarloPricer};
//!
//! let contract = ContractSpec::builder()
//!     .notional(100_000.0)
//!     .initial_price(11.08)
//!     .volatility(0.6039)
//!     .maturity_strike_ratio(0.96)
//!     .knock_in_ratio(0.92)
//!     .auto_call_ratio(0.99)
//!     .coupon_times(vec![1.0 / 12.0, 2.0 / 12.0, 0.5])
//!     .tenor(0.5)
//!     .n_steps(180)
//!     .build()
//!     .unwrap();
//!
//! let config = EngineConfig::builder()
//!     .n_paths(2_000)
//!     .workers(2)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let pricer = MonteCarloPricer::new(config);
//! let rates = RateModel::Plain { rate: 0.0287 };
//! let result = pricer.fair_value(0.03, &contract, &rates).unwrap();
//! assert!(result.value > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for the engine configuration and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod chunk;
pub mod config;
pub mod engine;
pub mod error;
pub mod paths;
pub mod payoff;
pub mod rng;

pub use chunk::{ChunkOutcome, ChunkTask};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::{FairValue, MonteCarloPricer};
pub use error::PricingError;
pub use paths::PathGenerator;
pub use payoff::{PathOutcome, PayoffEvaluator};
pub use rng::ShockRng;
