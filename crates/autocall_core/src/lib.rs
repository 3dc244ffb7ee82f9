//! # autocall_core: Contract Definitions for the Autocall Pricer
//!
//! Foundation layer of the workspace, providing:
//! - Contract terms for the auto-callable note (`contract`)
//! - Rate models for plain and quanto settlement (`rates`)
//! - The derived coupon/auto-call step schedule (`schedule`)
//! - Error types: `ConfigError`, `DegeneratePeriodError` (`error`)
//!
//! This crate has no dependencies on the other autocall_* crates and does no
//! simulation itself; it defines the immutable inputs the pricing engine and
//! calibrator consume.
//!
//! ## Usage
//!
//! ```rust
//! use autocall_core::{ContractSpec, CouponSchedule, RateModel};
//!
//! let spec = ContractSpec::builder()
//!     .notional(100_000.0)
//!     .initial_price(11.08)
//!     .volatility(0.6039)
//!     .maturity_strike_ratio(0.96)
//!     .knock_in_ratio(0.92)
//!     .auto_call_ratio(0.99)
//!     .coupon_times(vec![0.25, 0.5])
//!     .tenor(0.5)
//!     .n_steps(180)
//!     .build()
//!     .expect("valid contract");
//!
//! let schedule = CouponSchedule::from_contract(&spec).expect("valid schedule");
//! assert_eq!(schedule.coupon_steps(), &[90, 180]);
//! assert_eq!(schedule.first_auto_call_step(), 90);
//!
//! let rates = RateModel::Plain { rate: 0.0287 };
//! assert_eq!(rates.discount_rate(), 0.0287);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for contract terms and rate models

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod contract;
pub mod error;
pub mod rates;
pub mod schedule;

pub use contract::{ContractSpec, ContractSpecBuilder};
pub use error::{ConfigError, DegeneratePeriodError};
pub use rates::RateModel;
pub use schedule::CouponSchedule;
