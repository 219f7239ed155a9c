use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minefield_core::*;

fn tiers() -> Vec<Difficulty> {
    vec![
        Difficulty::beginner(),
        Difficulty::intermediate(),
        Difficulty::expert(),
        Difficulty::new("Huge", 255, 255, 10_000).unwrap(),
    ]
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in tiers() {
        let safe = (difficulty.width() / 2, difficulty.height() / 2);
        for strategy in [
            GenerationStrategy::Uniform,
            GenerationStrategy::Balanced { max_attempts: 10 },
        ] {
            let id = BenchmarkId::new(format!("{strategy:?}"), difficulty.name());
            group.bench_with_input(id, &difficulty, |b, difficulty| {
                let mut generator = RandomMinefieldGenerator::new(7, strategy);
                b.iter(|| generator.generate(black_box(difficulty), safe).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for difficulty in tiers() {
        let safe = (difficulty.width() / 2, difficulty.height() / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.name()),
            &difficulty,
            |b, difficulty| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let generator = RandomMinefieldGenerator::from_seed(seed);
                    let mut board = Board::with_generator(difficulty.clone(), generator);
                    board.reveal_cell(black_box(safe)).unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_flood_fill);
criterion_main!(benches);
