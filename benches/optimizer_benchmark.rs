//! Performance benchmarks for the budget optimizer and a full planning step
//!
//! 1. **optimize** - knapsack over random candidate sets of growing size
//! 2. **decide** - one main-phase decision on the demo snapshot, from a fresh table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use duel_ai::{
    ai::{optimize, AiConfig, AiPlayer},
    core::PlayerId,
    game::{AiLogger, Table, TableSnapshot, VerbosityLevel},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_items(len: usize, seed: u64) -> Vec<(u32, f64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| (rng.gen_range(0..=10), rng.gen_range(0.0..250.0)))
        .collect()
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    for len in [8usize, 32, 128] {
        let items = random_items(len, 42);
        for budget in [5u32, 20] {
            group.bench_with_input(
                BenchmarkId::new(format!("budget_{budget}"), len),
                &items,
                |b, items| b.iter(|| optimize(black_box(items), black_box(budget))),
            );
        }
    }
    group.finish();
}

fn bench_decide(c: &mut Criterion) {
    let json = include_str!("../demos/main_phase.json");
    let snapshot: TableSnapshot = serde_json::from_str(json).expect("demo snapshot should parse");
    let ai = AiPlayer::with_logger(
        AiConfig::new(PlayerId::new(0), PlayerId::new(1)),
        AiLogger::with_verbosity(VerbosityLevel::Silent),
    );

    c.bench_function("decide_main_phase", |b| {
        b.iter(|| {
            let mut table = Table::from_snapshot(snapshot.clone()).expect("demo snapshot should load");
            black_box(ai.decide(&mut table).expect("decision should succeed"))
        })
    });
}

criterion_group!(benches, bench_optimize, bench_decide);
criterion_main!(benches);
