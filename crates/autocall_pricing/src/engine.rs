//! Parallel reduction engine: many trajectories to one fair value.

use autocall_core::{ContractSpec, RateModel};
use rayon::prelude::*;
use tracing::debug;

use crate::chunk::{ChunkOutcome, ChunkTask};
use crate::config::EngineConfig;
use crate::error::PricingError;

/// Fair value estimate with sampling diagnostics.
///
/// The point estimate is the arithmetic mean of all discounted path values.
/// The standard error is computed over antithetic pair means, since the two
/// halves of a pair are deliberately correlated and do not count as
/// independent samples.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FairValue {
    /// Fair value in notional-currency units.
    pub value: f64,
    /// Standard error of the estimate, over pair means.
    pub std_error: f64,
    /// Total number of simulated paths.
    pub n_paths: usize,
}

impl FairValue {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the fair value as a percentage of the given notional.
    #[inline]
    pub fn pct_of_notional(&self, notional: f64) -> f64 {
        self.value / notional * 100.0
    }
}

/// Monte Carlo pricer for the auto-callable note.
///
/// Partitions the configured pair count across the configured workers, runs
/// one [`ChunkTask`] per worker on a rayon pool, joins all partial sums, and
/// returns the sample mean. Every pair is covered exactly once: each worker
/// receives `floor(pairs / workers)` pairs and the last absorbs the
/// remainder.
///
/// The grand sum is mathematically order-independent, but floating-point
/// addition is not associative, so bit-for-bit equality is only guaranteed
/// for a fixed seed and worker count.
///
/// # Failure semantics
///
/// If any chunk fails the whole run fails with [`PricingError::Worker`];
/// the engine never substitutes a default value for a partial result.
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: EngineConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer with the given configuration.
    #[inline]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Prices the note at the given per-period coupon rate.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Worker`] if any chunk fails.
    pub fn fair_value(
        &self,
        coupon_rate: f64,
        contract: &ContractSpec,
        rates: &RateModel,
    ) -> Result<FairValue, PricingError> {
        let growth_rate = rates.growth_rate(contract.volatility());
        let discount_rate = rates.discount_rate();

        let tasks = self.partition(coupon_rate, growth_rate, discount_rate, contract);
        debug!(
            n_paths = self.config.n_paths(),
            workers = self.config.workers(),
            chunks = tasks.len(),
            seed = self.config.seed(),
            "dispatching simulation chunks"
        );

        let outcomes: Vec<ChunkOutcome> = tasks
            .into_par_iter()
            .map(|task| {
                task.run().map_err(|source| PricingError::Worker {
                    index: task.index,
                    source,
                })
            })
            .collect::<Result<_, _>>()?;

        let n_paths = self.config.n_paths();
        let n_pairs = self.config.n_pairs();
        let payoff_sum: f64 = outcomes.iter().map(|o| o.payoff_sum).sum();
        let value = payoff_sum / n_paths as f64;

        // Pair means average to the fair value itself, so the sample
        // variance over pairs comes straight from the squared sums.
        let pair_mean_sq_sum: f64 = outcomes.iter().map(|o| o.pair_mean_sq_sum).sum();
        let std_error = if n_pairs > 1 {
            let variance =
                (pair_mean_sq_sum - n_pairs as f64 * value * value) / (n_pairs - 1) as f64;
            (variance.max(0.0) / n_pairs as f64).sqrt()
        } else {
            0.0
        };

        debug!(value, std_error, "simulation complete");

        Ok(FairValue {
            value,
            std_error,
            n_paths,
        })
    }

    /// Splits the configured pair count into one task per worker.
    fn partition<'a>(
        &self,
        coupon_rate: f64,
        growth_rate: f64,
        discount_rate: f64,
        contract: &'a ContractSpec,
    ) -> Vec<ChunkTask<'a>> {
        let n_pairs = self.config.n_pairs();
        let workers = self.config.workers();
        let pairs_per_worker = (n_pairs / workers).max(1);

        let mut tasks = Vec::with_capacity(workers);
        let mut remaining = n_pairs;
        for i in 0..workers {
            let pairs = if i == workers - 1 {
                remaining
            } else {
                pairs_per_worker.min(remaining)
            };
            if pairs > 0 {
                tasks.push(ChunkTask {
                    index: tasks.len(),
                    pairs,
                    coupon_rate,
                    growth_rate,
                    discount_rate,
                    contract,
                    seed: self.config.seed().wrapping_add(tasks.len() as u64),
                });
                remaining -= pairs;
            }
            if remaining == 0 {
                break;
            }
        }
        tasks
    }
}
