//! Contract terms for the auto-callable note.
//!
//! This module provides the immutable [`ContractSpec`] value describing one
//! note, a validating [`ContractSpecBuilder`], and copy-with-update
//! constructors used by calibration to vary a single barrier while keeping
//! the rest of the contract fixed.

use crate::error::ConfigError;

/// Immutable terms of an auto-callable, barrier-protected note.
///
/// All barrier levels are expressed as fractions of the initial underlying
/// price; coupon observation times are year fractions within the tenor. The
/// per-period coupon rate is deliberately not part of the contract terms: it
/// is the free argument the pricer is called with and calibration solves for.
///
/// Construct instances with [`ContractSpec::builder`]; a built value always
/// satisfies the invariants listed on [`ContractSpecBuilder::build`].
/// "Changing a field" means constructing a new value via one of the
/// `with_*` methods, which re-validate.
///
/// # Examples
///
/// ```rust
/// use autocall_core::ContractSpec;
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
///     .expect("valid contract");
///
/// assert_eq!(spec.n_steps(), 180);
/// assert!((spec.dt() - 0.5 / 180.0).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractSpec {
    /// Notional amount in the note's settlement currency.
    notional: f64,
    /// Initial underlying price S0.
    initial_price: f64,
    /// Annualised volatility of the underlying.
    volatility: f64,
    /// Maturity strike as a fraction of S0 (K0).
    maturity_strike_ratio: f64,
    /// Knock-in barrier as a fraction of S0 (KI).
    knock_in_ratio: f64,
    /// Auto-call barrier as a fraction of S0 (AC).
    auto_call_ratio: f64,
    /// Coupon observation times as year fractions, strictly increasing.
    coupon_times: Vec<f64>,
    /// Total tenor in years.
    tenor: f64,
    /// Number of discretisation steps over the tenor.
    n_steps: usize,
}

impl ContractSpec {
    /// Creates a new contract builder.
    #[inline]
    pub fn builder() -> ContractSpecBuilder {
        ContractSpecBuilder::default()
    }

    /// Returns the notional amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the initial underlying price S0.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the maturity strike ratio K0.
    #[inline]
    pub fn maturity_strike_ratio(&self) -> f64 {
        self.maturity_strike_ratio
    }

    /// Returns the knock-in barrier ratio KI.
    #[inline]
    pub fn knock_in_ratio(&self) -> f64 {
        self.knock_in_ratio
    }

    /// Returns the auto-call barrier ratio AC.
    #[inline]
    pub fn auto_call_ratio(&self) -> f64 {
        self.auto_call_ratio
    }

    /// Returns the coupon observation times (year fractions).
    #[inline]
    pub fn coupon_times(&self) -> &[f64] {
        &self.coupon_times
    }

    /// Returns the tenor in years.
    #[inline]
    pub fn tenor(&self) -> f64 {
        self.tenor
    }

    /// Returns the number of discretisation steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the step size dt = tenor / n_steps.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.tenor / self.n_steps as f64
    }

    /// Returns the knock-in price KI × S0.
    #[inline]
    pub fn knock_in_price(&self) -> f64 {
        self.knock_in_ratio * self.initial_price
    }

    /// Returns the auto-call price AC × S0.
    #[inline]
    pub fn auto_call_price(&self) -> f64 {
        self.auto_call_ratio * self.initial_price
    }

    /// Returns the maturity strike price K0 × S0.
    #[inline]
    pub fn maturity_strike_price(&self) -> f64 {
        self.maturity_strike_ratio * self.initial_price
    }

    /// Returns a copy of this contract with a new maturity strike ratio.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the new ratio is not positive and finite.
    pub fn with_maturity_strike_ratio(&self, ratio: f64) -> Result<Self, ConfigError> {
        let mut spec = self.clone();
        spec.maturity_strike_ratio = ratio;
        spec.validate()?;
        Ok(spec)
    }

    /// Returns a copy of this contract with a new knock-in barrier ratio.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the new ratio is negative or non-finite.
    pub fn with_knock_in_ratio(&self, ratio: f64) -> Result<Self, ConfigError> {
        let mut spec = self.clone();
        spec.knock_in_ratio = ratio;
        spec.validate()?;
        Ok(spec)
    }

    /// Returns a copy of this contract with a new auto-call barrier ratio.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the new ratio is negative or non-finite.
    pub fn with_auto_call_ratio(&self, ratio: f64) -> Result<Self, ConfigError> {
        let mut spec = self.clone();
        spec.auto_call_ratio = ratio;
        spec.validate()?;
        Ok(spec)
    }

    /// Validates all contract invariants.
    fn validate(&self) -> Result<(), ConfigError> {
        require_positive("notional", self.notional)?;
        require_positive("initial_price", self.initial_price)?;
        require_non_negative("volatility", self.volatility)?;
        require_positive("maturity_strike_ratio", self.maturity_strike_ratio)?;
        require_non_negative("knock_in_ratio", self.knock_in_ratio)?;
        require_non_negative("auto_call_ratio", self.auto_call_ratio)?;
        require_positive("tenor", self.tenor)?;

        if self.n_steps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "n_steps",
                value: "must be at least 1".to_string(),
            });
        }

        if self.coupon_times.is_empty() {
            return Err(ConfigError::EmptyCouponTimes);
        }
        for (index, &t) in self.coupon_times.iter().enumerate() {
            if !(t > 0.0 && t <= self.tenor) {
                return Err(ConfigError::CouponTimeOutOfRange {
                    index,
                    value: t,
                    tenor: self.tenor,
                });
            }
            if index > 0 {
                let previous = self.coupon_times[index - 1];
                if t <= previous {
                    return Err(ConfigError::NonIncreasingCouponTimes {
                        index,
                        previous,
                        current: t,
                    });
                }
            }
        }

        Ok(())
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value: format!("must be positive and finite, got {}", value),
        })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value: format!("must be non-negative and finite, got {}", value),
        })
    }
}

/// Builder for [`ContractSpec`].
///
/// All fields are required; validation happens once at build time so a
/// constructed contract is always internally consistent.
#[derive(Clone, Debug, Default)]
pub struct ContractSpecBuilder {
    notional: Option<f64>,
    initial_price: Option<f64>,
    volatility: Option<f64>,
    maturity_strike_ratio: Option<f64>,
    knock_in_ratio: Option<f64>,
    auto_call_ratio: Option<f64>,
    coupon_times: Option<Vec<f64>>,
    tenor: Option<f64>,
    n_steps: Option<usize>,
}

impl ContractSpecBuilder {
    /// Sets the notional amount.
    #[inline]
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the initial underlying price S0.
    #[inline]
    pub fn initial_price(mut self, initial_price: f64) -> Self {
        self.initial_price = Some(initial_price);
        self
    }

    /// Sets the annualised volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the maturity strike ratio K0.
    #[inline]
    pub fn maturity_strike_ratio(mut self, ratio: f64) -> Self {
        self.maturity_strike_ratio = Some(ratio);
        self
    }

    /// Sets the knock-in barrier ratio KI.
    #[inline]
    pub fn knock_in_ratio(mut self, ratio: f64) -> Self {
        self.knock_in_ratio = Some(ratio);
        self
    }

    /// Sets the auto-call barrier ratio AC.
    #[inline]
    pub fn auto_call_ratio(mut self, ratio: f64) -> Self {
        self.auto_call_ratio = Some(ratio);
        self
    }

    /// Sets the coupon observation times (year fractions).
    #[inline]
    pub fn coupon_times(mut self, times: Vec<f64>) -> Self {
        self.coupon_times = Some(times);
        self
    }

    /// Sets the tenor in years.
    #[inline]
    pub fn tenor(mut self, tenor: f64) -> Self {
        self.tenor = Some(tenor);
        self
    }

    /// Sets the number of discretisation steps.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Builds the contract, validating every field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - any field is missing
    /// - notional, initial price, tenor, or the maturity strike ratio is
    ///   not positive and finite
    /// - volatility, the knock-in ratio, or the auto-call ratio is negative
    ///   or non-finite
    /// - the step count is zero
    /// - coupon times are empty, not strictly increasing, or outside
    ///   (0, tenor]
    pub fn build(self) -> Result<ContractSpec, ConfigError> {
        let spec = ContractSpec {
            notional: required(self.notional, "notional")?,
            initial_price: required(self.initial_price, "initial_price")?,
            volatility: required(self.volatility, "volatility")?,
            maturity_strike_ratio: required(self.maturity_strike_ratio, "maturity_strike_ratio")?,
            knock_in_ratio: required(self.knock_in_ratio, "knock_in_ratio")?,
            auto_call_ratio: required(self.auto_call_ratio, "auto_call_ratio")?,
            coupon_times: required(self.coupon_times, "coupon_times")?,
            tenor: required(self.tenor, "tenor")?,
            n_steps: required(self.n_steps, "n_steps")?,
        };

        spec.validate()?;
        Ok(spec)
    }
}

fn required<T>(field: Option<T>, name: &'static str) -> Result<T, ConfigError> {
    field.ok_or(ConfigError::InvalidParameter {
        name,
        value: "must be specified".to_string(),
    })
}
