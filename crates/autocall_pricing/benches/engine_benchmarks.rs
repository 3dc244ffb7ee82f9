//! Criterion benchmarks for the Monte Carlo pricing engine.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use autocall_core::{ContractSpec, RateModel};
use autocall_pricing::{EngineConfig, MonteCarloPricer};

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

fn bench_fair_value(c: &mut Criterion) {
    let contract = production_contract();
    let rates = RateModel::Plain { rate: 0.0287 };

    let mut group = c.benchmark_group("fair_value");
    for n_paths in [2_000usize, 10_000, 50_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(n_paths),
            &n_paths,
            |b, &n_paths| {
                let pricer = MonteCarloPricer::new(
                    EngineConfig::builder()
                        .n_paths(n_paths)
                        .workers(4)
                        .seed(42)
                        .build()
                        .unwrap(),
                );
                b.iter(|| pricer.fair_value(0.0346, &contract, &rates).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_single_worker(c: &mut Criterion) {
    let contract = production_contract();
    let rates = RateModel::Plain { rate: 0.0287 };
    let pricer = MonteCarloPricer::new(
        EngineConfig::builder()
            .n_paths(10_000)
            .workers(1)
            .seed(42)
            .build()
            .unwrap(),
    );

    c.bench_function("fair_value_single_worker_10k", |b| {
        b.iter(|| pricer.fair_value(0.0346, &contract, &rates).unwrap());
    });
}

criterion_group!(benches, bench_fair_value, bench_single_worker);
criterion_main!(benches);
