//! Antithetic pairing must reduce estimator variance, not just halve the
//! number of random draws.

use autocall_core::{ContractSpec, CouponSchedule};
use autocall_pricing::{PathGenerator, PayoffEvaluator, ShockRng};

const RATE: f64 = 0.0287;
const COUPON: f64 = 0.0346;
const PAIRS: usize = 4_000;

fn production_contract() -> ContractSpec {
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

fn sample_variance(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (values.len() - 1) as f64
}

#[test]
fn antithetic_pair_means_have_lower_variance_than_independent_pairs() {
    let contract = production_contract();
    let schedule = CouponSchedule::from_contract(&contract).unwrap();
    let generator = PathGenerator::new(&contract, RATE);
    let evaluator = PayoffEvaluator::new(&contract, &schedule, COUPON, RATE);

    let n = contract.n_steps();
    let mut rng = ShockRng::from_seed(777);
    let mut shocks = vec![0.0; n];
    let mut path = vec![0.0; n + 1];

    let mut evaluate = |shocks: &[f64], path: &mut [f64]| {
        generator.generate_into(shocks, path);
        evaluator.evaluate(path).value
    };

    // Antithetic: each pair is one draw and its mirror image.
    let mut antithetic_means = Vec::with_capacity(PAIRS);
    for _ in 0..PAIRS {
        rng.fill(&mut shocks);
        let first = evaluate(&shocks, &mut path);
        for z in shocks.iter_mut() {
            *z = -*z;
        }
        let second = evaluate(&shocks, &mut path);
        antithetic_means.push(0.5 * (first + second));
    }

    // Independent: each pair is two fresh draws, same evaluation count.
    let mut independent_means = Vec::with_capacity(PAIRS);
    for _ in 0..PAIRS {
        rng.fill(&mut shocks);
        let first = evaluate(&shocks, &mut path);
        rng.fill(&mut shocks);
        let second = evaluate(&shocks, &mut path);
        independent_means.push(0.5 * (first + second));
    }

    let var_antithetic = sample_variance(&antithetic_means);
    let var_independent = sample_variance(&independent_means);
    assert!(
        var_antithetic < var_independent,
        "antithetic variance {} should be below independent variance {}",
        var_antithetic,
        var_independent
    );

    // Both estimators target the same expectation.
    let mean_antithetic = antithetic_means.iter().sum::<f64>() / PAIRS as f64;
    let mean_independent = independent_means.iter().sum::<f64>() / PAIRS as f64;
    let se = ((var_antithetic + var_independent) / PAIRS as f64).sqrt();
    assert!(
        (mean_antithetic - mean_independent).abs() < 5.0 * se,
        "estimators disagree beyond noise: {} vs {}",
        mean_antithetic,
        mean_independent
    );
}
