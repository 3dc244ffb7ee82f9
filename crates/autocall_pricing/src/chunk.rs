//! Antithetic pair simulation within one unit of parallel work.

use autocall_core::{ContractSpec, CouponSchedule, DegeneratePeriodError};

use crate::paths::PathGenerator;
use crate::payoff::PayoffEvaluator;
use crate::rng::ShockRng;

/// Self-contained unit of work covering `2 × pairs` paths.
///
/// Each task owns its own seeded random stream and derives its own
/// [`CouponSchedule`]; nothing mutable is shared across tasks. For every
/// antithetic pair one shock vector is drawn, the payoff is evaluated on it
/// and on its negation, and both values feed the running sum. Only the
/// finished [`ChunkOutcome`] leaves the task.
#[derive(Clone, Copy, Debug)]
pub struct ChunkTask<'a> {
    /// Index of this chunk within the run, used for error attribution.
    pub index: usize,
    /// Number of antithetic pairs to simulate.
    pub pairs: usize,
    /// Per-period coupon rate as a fraction.
    pub coupon_rate: f64,
    /// Drift rate of the underlying.
    pub growth_rate: f64,
    /// Discount rate for present-valuing cash flows.
    pub discount_rate: f64,
    /// Contract terms, shared read-only.
    pub contract: &'a ContractSpec,
    /// Seed for this chunk's private random stream.
    pub seed: u64,
}

/// Finished partial result of one chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChunkOutcome {
    /// Sum of discounted payoffs over all `2 × pairs` paths.
    pub payoff_sum: f64,
    /// Sum of squared per-pair means, for the standard-error diagnostic.
    pub pair_mean_sq_sum: f64,
    /// Number of antithetic pairs simulated.
    pub pairs: usize,
}

impl ChunkTask<'_> {
    /// Runs the chunk to completion.
    ///
    /// # Errors
    ///
    /// Returns [`DegeneratePeriodError`] if the contract's coupon schedule
    /// collapses at the configured step resolution.
    pub fn run(&self) -> Result<ChunkOutcome, DegeneratePeriodError> {
        let schedule = CouponSchedule::from_contract(self.contract)?;
        let generator = PathGenerator::new(self.contract, self.growth_rate);
        let evaluator = PayoffEvaluator::new(
            self.contract,
            &schedule,
            self.coupon_rate,
            self.discount_rate,
        );

        let n_steps = self.contract.n_steps();
        let mut rng = ShockRng::from_seed(self.seed);
        let mut shocks = vec![0.0; n_steps];
        let mut path = vec![0.0; n_steps + 1];

        let mut payoff_sum = 0.0;
        let mut pair_mean_sq_sum = 0.0;

        for _ in 0..self.pairs {
            rng.fill(&mut shocks);

            generator.generate_into(&shocks, &mut path);
            let first = evaluator.evaluate(&path).value;

            for z in shocks.iter_mut() {
                *z = -*z;
            }
            generator.generate_into(&shocks, &mut path);
            let second = evaluator.evaluate(&path).value;

            payoff_sum += first + second;
            let pair_mean = 0.5 * (first + second);
            pair_mean_sq_sum += pair_mean * pair_mean;
        }

        Ok(ChunkOutcome {
            payoff_sum,
            pair_mean_sq_sum,
            pairs: self.pairs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> ContractSpec {
        ContractSpec::builder()
            .notional(100_000.0)
            .initial_price(11.08)
            .volatility(0.6039)
            .maturity_strike_ratio(0.96)
            .knock_in_ratio(0.92)
            .auto_call_ratio(0.99)
            .coupon_times(vec![
                1.0 / 12.0,
                2.0 / 12.0,
                3.0 / 12.0,
                4.0 / 12.0,
                5.0 / 12.0,
                0.5,
            ])
            .tenor(0.5)
            .n_steps(180)
            .build()
            .unwrap()
    }

    fn task(contract: &ContractSpec, pairs: usize, seed: u64) -> ChunkTask<'_> {
        ChunkTask {
            index: 0,
            pairs,
            coupon_rate: 0.03,
            growth_rate: 0.0287,
            discount_rate: 0.0287,
            contract,
            seed,
        }
    }

    #[test]
    fn test_chunk_is_deterministic_for_fixed_seed() {
        let contract = contract();
        let a = task(&contract, 50, 42).run().unwrap();
        let b = task(&contract, 50, 42).run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_give_different_sums() {
        let contract = contract();
        let a = task(&contract, 50, 1).run().unwrap();
        let b = task(&contract, 50, 2).run().unwrap();
        assert_ne!(a.payoff_sum, b.payoff_sum);
    }

    #[test]
    fn test_zero_pairs_yields_empty_outcome() {
        let contract = contract();
        let outcome = task(&contract, 0, 0).run().unwrap();
        assert_eq!(outcome, ChunkOutcome::default());
    }

    #[test]
    fn test_pair_count_reported() {
        let contract = contract();
        let outcome = task(&contract, 17, 9).run().unwrap();
        assert_eq!(outcome.pairs, 17);
        assert!(outcome.payoff_sum > 0.0);
        assert!(outcome.pair_mean_sq_sum > 0.0);
    }

    #[test]
    fn test_degenerate_schedule_fails_inside_chunk() {
        let contract = ContractSpec::builder()
            .notional(100_000.0)
            .initial_price(11.08)
            .volatility(0.6039)
            .maturity_strike_ratio(0.96)
            .knock_in_ratio(0.92)
            .auto_call_ratio(0.99)
            .coupon_times(vec![0.0001, 0.5])
            .tenor(0.5)
            .n_steps(180)
            .build()
            .unwrap();
        let err = task(&contract, 10, 0).run().unwrap_err();
        assert_eq!(err.step, 0);
    }

    #[test]
    fn test_zero_volatility_pairs_coincide() {
        // With σ = 0 both halves of every pair are the same flat path, so
        // the chunk mean equals the per-path value exactly.
        let contract = ContractSpec::builder()
            .notional(100_000.0)
            .initial_price(11.08)
            .volatility(0.0)
            .maturity_strike_ratio(0.96)
            .knock_in_ratio(0.92)
            .auto_call_ratio(0.99)
            .coupon_times(vec![1.0 / 12.0, 0.5])
            .tenor(0.5)
            .n_steps(180)
            .build()
            .unwrap();
        let mut task = task(&contract, 25, 3);
        task.growth_rate = 0.0;
        task.discount_rate = 0.0;
        let outcome = task.run().unwrap();

        // Flat at S0, AC = 0.99 ≤ 1: calls at the first coupon step paying
        // notional plus one full coupon, undiscounted.
        let per_path = 100_000.0 * 1.03;
        let mean = outcome.payoff_sum / (2.0 * outcome.pairs as f64);
        assert!((mean - per_path).abs() < 1e-9);
    }
}
