//! End-to-end multi-realization sweep benchmarks.
//!
//! Compares the sequential and rayon-backed strategies on the reference
//! lattice over a shortened sweep.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use smallworld_benches::{error::BenchSetupError, fixtures::SEED};
use smallworld_core::{ExecutionStrategy, ExperimentBuilder, ProbabilitySweep};

const TRIALS: usize = 15;

fn sweep_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("multi_sweep");
    group.sample_size(10);

    let sweep = ProbabilitySweep::arange(0.0, 0.1, 0.005)?;
    for (label, strategy) in [
        ("sequential", ExecutionStrategy::Sequential),
        ("parallel", ExecutionStrategy::Parallel),
    ] {
        let experiment = ExperimentBuilder::new()
            .with_trials(TRIALS)
            .with_seed(SEED)
            .with_execution_strategy(strategy)
            .build()?;
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &experiment,
            |b, exp| b.iter(|| exp.run_multi(&sweep)),
        );
    }

    group.finish();
    Ok(())
}

fn sweep(c: &mut Criterion) {
    if let Err(err) = sweep_impl(c) {
        panic!("sweep benchmark setup failed: {err}");
    }
}

criterion_group!(benches, sweep);
criterion_main!(benches);
