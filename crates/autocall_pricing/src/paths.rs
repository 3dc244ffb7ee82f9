//! Euler path generation for the underlying price.

use autocall_core::ContractSpec;

/// Generates one simulated price trajectory from a vector of shocks.
///
/// Applies the Euler–Maruyama update on the lognormal SDE,
///
/// ```text
/// S[i+1] = S[i] + r_g·S[i]·dt + σ·S[i]·z[i]·sqrt(dt),    S[0] = S0,
/// ```
///
/// writing N+1 prices into a caller-supplied buffer. Pure function of the
/// shock vector and the generator's parameters.
///
/// # Negative prices
///
/// The discrete update is not clamped: a large negative shock combined with
/// a large `σ·sqrt(dt)` can push a simulated price below zero, after which
/// the path evolves from the negative value. This discretisation artifact is
/// intentional; downstream barrier comparisons are total over negative
/// prices and the payoff stays finite.
///
/// # Examples
///
/// ```rust
/// use autocall_core::ContractSpec;
/// use autocall_pricing::PathGenerator;
///
/// let contract = ContractSpec::builder()
///     .notional(100.0)
///     .initial_price(10.0)
///     .volatility(0.0)
///     .maturity_strike_ratio(0.96)
///     .knock_in_ratio(0.92)
///     .auto_call_ratio(0.99)
///     .coupon_times(vec![0.25, 0.5])
///     .tenor(0.5)
///     .n_steps(4)
///     .build()
///     .unwrap();
///
/// let generator = PathGenerator::new(&contract, 0.0);
/// let shocks = [0.3, -0.1, 0.7, -0.4];
/// let mut path = [0.0; 5];
/// generator.generate_into(&shocks, &mut path);
///
/// // Zero volatility and zero drift: the path stays flat at S0.
/// assert_eq!(path, [10.0; 5]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PathGenerator {
    /// Initial underlying price S0.
    initial_price: f64,
    /// Drift rate r_g of the underlying.
    growth_rate: f64,
    /// Annualised volatility σ.
    volatility: f64,
    /// Step size dt = tenor / n_steps.
    dt: f64,
    /// Precomputed sqrt(dt).
    sqrt_dt: f64,
}

impl PathGenerator {
    /// Creates a generator for the given contract and drift rate.
    #[inline]
    pub fn new(contract: &ContractSpec, growth_rate: f64) -> Self {
        let dt = contract.dt();
        Self {
            initial_price: contract.initial_price(),
            growth_rate,
            volatility: contract.volatility(),
            dt,
            sqrt_dt: dt.sqrt(),
        }
    }

    /// Fills `path` with one trajectory driven by `shocks`.
    ///
    /// `path` must hold exactly one more element than `shocks`; index 0 is
    /// set to the initial price and each shock produces one step.
    #[inline]
    pub fn generate_into(&self, shocks: &[f64], path: &mut [f64]) {
        debug_assert_eq!(path.len(), shocks.len() + 1);

        path[0] = self.initial_price;
        for (i, &z) in shocks.iter().enumerate() {
            let s = path[i];
            let ds = self.growth_rate * s * self.dt + self.volatility * s * z * self.sqrt_dt;
            path[i + 1] = s + ds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contract(volatility: f64, n_steps: usize) -> ContractSpec {
        ContractSpec::builder()
            .notional(100.0)
            .initial_price(10.0)
            .volatility(volatility)
            .maturity_strike_ratio(0.96)
            .knock_in_ratio(0.92)
            .auto_call_ratio(0.99)
            .coupon_times(vec![0.25, 0.5])
            .tenor(0.5)
            .n_steps(n_steps)
            .build()
            .unwrap()
    }

    #[test]
    fn test_path_starts_at_initial_price() {
        let generator = PathGenerator::new(&contract(0.3, 4), 0.05);
        let mut path = [0.0; 5];
        generator.generate_into(&[0.1, 0.2, -0.3, 0.4], &mut path);
        assert_eq!(path[0], 10.0);
    }

    #[test]
    fn test_zero_volatility_zero_drift_is_flat() {
        let generator = PathGenerator::new(&contract(0.0, 8), 0.0);
        let mut path = [0.0; 9];
        generator.generate_into(&[1.5; 8], &mut path);
        for &price in &path {
            assert_eq!(price, 10.0);
        }
    }

    #[test]
    fn test_zero_volatility_compounds_drift() {
        let spec = contract(0.0, 2);
        let generator = PathGenerator::new(&spec, 0.04);
        let mut path = [0.0; 3];
        generator.generate_into(&[0.0, 0.0], &mut path);

        let dt = spec.dt();
        assert_relative_eq!(path[1], 10.0 * (1.0 + 0.04 * dt), epsilon = 1e-14);
        let growth = 1.0 + 0.04 * dt;
        assert_relative_eq!(path[2], 10.0 * growth * growth, epsilon = 1e-14);
    }

    #[test]
    fn test_single_step_matches_update_formula() {
        let spec = contract(0.6, 1);
        let generator = PathGenerator::new(&spec, 0.03);
        let mut path = [0.0; 2];
        let z = -0.8;
        generator.generate_into(&[z], &mut path);

        let dt = spec.dt();
        let expected = 10.0 + 0.03 * 10.0 * dt + 0.6 * 10.0 * z * dt.sqrt();
        assert_relative_eq!(path[1], expected, epsilon = 1e-14);
    }

    #[test]
    fn test_extreme_shock_produces_negative_price() {
        // One step over the full tenor: σ·sqrt(dt) is large, so a big
        // negative shock pushes the price below zero. The update is not
        // clamped, so the path carries the negative value forward.
        let spec = contract(0.6, 1);
        let generator = PathGenerator::new(&spec, 0.0);
        let mut path = [0.0; 2];
        generator.generate_into(&[-4.0], &mut path);

        assert!(path[1] < 0.0, "expected a negative price, got {}", path[1]);
        assert!(path[1].is_finite());
    }

    #[test]
    fn test_deterministic_for_fixed_shocks() {
        let generator = PathGenerator::new(&contract(0.6039, 180), 0.0287);
        let shocks: Vec<f64> = (0..180).map(|i| ((i * 37) % 13) as f64 / 13.0 - 0.5).collect();
        let mut path1 = vec![0.0; 181];
        let mut path2 = vec![0.0; 181];
        generator.generate_into(&shocks, &mut path1);
        generator.generate_into(&shocks, &mut path2);
        assert_eq!(path1, path2);
    }
}
