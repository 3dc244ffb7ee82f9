//! Rate models for growth and discounting.
//!
//! The simulation grows the underlying at one rate and discounts cash flows
//! at another; which rates those are depends on the currency arrangement of
//! the note. [`RateModel`] is a closed enumeration of the supported
//! arrangements, so adding a new one is a compile-time change that every
//! `match` in the workspace must acknowledge.

/// Currency arrangement of the note, determining growth and discount rates.
///
/// # Examples
///
/// ```rust
/// use autocall_core::RateModel;
///
/// let plain = RateModel::Plain { rate: 0.0287 };
/// assert_eq!(plain.growth_rate(0.6039), 0.0287);
/// assert_eq!(plain.discount_rate(), 0.0287);
///
/// // A quanto note grows the underlying in its foreign market with a
/// // correlation adjustment, and discounts in the domestic currency.
/// let quanto = RateModel::Quanto {
///     domestic_rate: 0.0169,
///     foreign_rate: 0.0287,
///     fx_volatility: 0.074,
///     correlation: 0.42,
/// };
/// let expected = 0.0287 + 0.42 * 0.6039 * 0.074;
/// assert!((quanto.growth_rate(0.6039) - expected).abs() < 1e-15);
/// assert_eq!(quanto.discount_rate(), 0.0169);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum RateModel {
    /// Single-currency note: one rate drives both growth and discounting.
    Plain {
        /// Risk-free rate used for growth and discounting.
        rate: f64,
    },
    /// Quanto note: the underlying trades in a foreign currency while the
    /// note settles in the domestic currency at a fixed exchange rate.
    Quanto {
        /// Domestic risk-free rate, used for discounting.
        domestic_rate: f64,
        /// Foreign risk-free rate, the base of the underlying's drift.
        foreign_rate: f64,
        /// Annualised volatility of the exchange rate.
        fx_volatility: f64,
        /// Correlation between underlying and exchange-rate returns.
        correlation: f64,
    },
}

impl RateModel {
    /// Returns the drift rate of the underlying.
    ///
    /// For a plain note this is the risk-free rate. For a quanto note the
    /// foreign drift is adjusted by the covariance between the underlying
    /// and the exchange rate:
    ///
    /// ```text
    /// growth = foreign_rate + correlation × volatility × fx_volatility
    /// ```
    ///
    /// # Arguments
    ///
    /// * `volatility` - Annualised volatility of the underlying.
    #[inline]
    pub fn growth_rate(&self, volatility: f64) -> f64 {
        match self {
            RateModel::Plain { rate } => *rate,
            RateModel::Quanto {
                foreign_rate,
                fx_volatility,
                correlation,
                ..
            } => foreign_rate + correlation * volatility * fx_volatility,
        }
    }

    /// Returns the rate used to discount cash flows to present value.
    #[inline]
    pub fn discount_rate(&self) -> f64 {
        match self {
            RateModel::Plain { rate } => *rate,
            RateModel::Quanto { domestic_rate, .. } => *domestic_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rates_coincide() {
        let model = RateModel::Plain { rate: 0.0287 };
        assert_eq!(model.growth_rate(0.6039), 0.0287);
        assert_eq!(model.discount_rate(), 0.0287);
    }

    #[test]
    fn test_plain_growth_ignores_volatility() {
        let model = RateModel::Plain { rate: 0.05 };
        assert_eq!(model.growth_rate(0.0), model.growth_rate(1.5));
    }

    #[test]
    fn test_quanto_growth_adjustment() {
        let model = RateModel::Quanto {
            domestic_rate: 0.0169,
            foreign_rate: 0.0287,
            fx_volatility: 0.074,
            correlation: 0.42,
        };
        let expected = 0.0287 + 0.42 * 0.6039 * 0.074;
        assert!((model.growth_rate(0.6039) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_quanto_discounts_domestically() {
        let model = RateModel::Quanto {
            domestic_rate: 0.0169,
            foreign_rate: 0.0287,
            fx_volatility: 0.074,
            correlation: 0.42,
        };
        assert_eq!(model.discount_rate(), 0.0169);
    }

    #[test]
    fn test_quanto_zero_correlation_reduces_to_foreign_drift() {
        let model = RateModel::Quanto {
            domestic_rate: 0.0169,
            foreign_rate: 0.0287,
            fx_volatility: 0.074,
            correlation: 0.0,
        };
        assert_eq!(model.growth_rate(0.6039), 0.0287);
    }

    #[test]
    fn test_quanto_negative_correlation_lowers_drift() {
        let model = RateModel::Quanto {
            domestic_rate: 0.0169,
            foreign_rate: 0.0287,
            fx_volatility: 0.074,
            correlation: -0.42,
        };
        assert!(model.growth_rate(0.6039) < 0.0287);
    }

    #[test]
    fn test_copy_semantics() {
        let model = RateModel::Plain { rate: 0.03 };
        let copied = model;
        assert_eq!(model, copied);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_tagged_round_trip() {
        let model = RateModel::Quanto {
            domestic_rate: 0.0169,
            foreign_rate: 0.0287,
            fx_volatility: 0.074,
            correlation: 0.42,
        };
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"type\":\"quanto\""));
        let back: RateModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }
}
