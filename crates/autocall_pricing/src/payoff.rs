//! Payoff evaluation for one simulated price path.
//!
//! The evaluator walks a trajectory through the note's contractual state
//! machine: the note accrues coupons until it either auto-calls (early
//! redemption plus accrued interest) or runs to maturity (final coupon plus
//! principal redemption, contingent on the knock-in barrier).

use autocall_core::{ContractSpec, CouponSchedule};

/// Result of evaluating one path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathOutcome {
    /// Total discounted cash flow for the path, in notional-currency units.
    pub value: f64,
    /// Step at which the note auto-called, if it did.
    pub call_step: Option<usize>,
    /// Whether the path breached the knock-in barrier.
    pub knocked_in: bool,
}

/// Evaluates the discounted payoff of one price trajectory.
///
/// Exactly one of the two terminal outcomes is produced per path: an
/// auto-call payoff (notional plus accrued interest, discounted from the
/// call step) or a maturity payoff (coupon stream plus principal
/// redemption). An auto-call supersedes any coupons observed at earlier
/// steps of the same path.
///
/// # Examples
///
/// ```rust
/// use autocall_core::{ContractSpec, CouponSchedule};
/// use autocall_pricing::PayoffEvaluator;
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
/// let schedule = CouponSchedule::from_contract(&contract).unwrap();
///
/// // Flat path at S0 with a call barrier below S0: calls at the first
/// // coupon step, paying notional plus one full coupon, undiscounted.
/// let evaluator = PayoffEvaluator::new(&contract, &schedule, 0.03, 0.0);
/// let outcome = evaluator.evaluate(&[10.0; 5]);
/// assert_eq!(outcome.call_step, Some(2));
/// assert!((outcome.value - 103.0).abs() < 1e-12);
/// assert!(!outcome.knocked_in);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PayoffEvaluator<'a> {
    /// Contract terms.
    contract: &'a ContractSpec,
    /// Derived coupon/auto-call step schedule.
    schedule: &'a CouponSchedule,
    /// Per-period coupon rate as a fraction.
    coupon_rate: f64,
    /// Continuously compounded discount rate.
    discount_rate: f64,
    /// Knock-in price KI × S0.
    knock_in_price: f64,
    /// Auto-call price AC × S0.
    auto_call_price: f64,
    /// Maturity strike price K0 × S0.
    strike_price: f64,
    /// Step size in years.
    dt: f64,
}

impl<'a> PayoffEvaluator<'a> {
    /// Creates an evaluator for the given contract, schedule, and rates.
    pub fn new(
        contract: &'a ContractSpec,
        schedule: &'a CouponSchedule,
        coupon_rate: f64,
        discount_rate: f64,
    ) -> Self {
        Self {
            contract,
            schedule,
            coupon_rate,
            discount_rate,
            knock_in_price: contract.knock_in_price(),
            auto_call_price: contract.auto_call_price(),
            strike_price: contract.maturity_strike_price(),
            dt: contract.dt(),
        }
    }

    /// Evaluates the total discounted cash flow for one path.
    ///
    /// `path` holds N+1 prices with index 0 at the initial price.
    pub fn evaluate(&self, path: &[f64]) -> PathOutcome {
        let n_steps = self.contract.n_steps();
        debug_assert_eq!(path.len(), n_steps + 1);

        let notional = self.contract.notional();
        let coupon_amount = notional * self.coupon_rate;

        // Knock-in is a path-wide predicate over the simulated steps,
        // independent of the call/coupon walk below.
        let knocked_in = path[1..]
            .iter()
            .fold(f64::INFINITY, |min, &s| min.min(s))
            < self.knock_in_price;

        let first_call_step = self.schedule.first_auto_call_step();
        let mut value = 0.0;

        for step in 1..=n_steps {
            let price = path[step];
            let time = step as f64 * self.dt;

            if step >= first_call_step && price >= self.auto_call_price {
                // Early redemption: notional plus interest accrued since the
                // preceding period boundary. This payoff alone is the path
                // value; coupons added at earlier steps are superseded.
                let accrued = coupon_amount * self.schedule.accrued_fraction(step);
                let discount = (-self.discount_rate * time).exp();
                return PathOutcome {
                    value: (notional + accrued) * discount,
                    call_step: Some(step),
                    knocked_in,
                };
            }

            // Interim coupon; the final coupon is paid with the maturity leg.
            if step < n_steps && self.schedule.is_coupon_step(step) {
                value += coupon_amount * (-self.discount_rate * time).exp();
            }
        }

        // Matured without calling: final coupon plus principal redemption,
        // both discounted from the full tenor.
        let discount = (-self.discount_rate * self.contract.tenor()).exp();
        let final_price = path[n_steps];
        let principal = if !knocked_in || final_price >= self.strike_price {
            notional
        } else {
            notional * final_price / self.strike_price
        };
        value += (coupon_amount + principal) * discount;

        PathOutcome {
            value,
            call_step: None,
            knocked_in,
        }
    }
}
