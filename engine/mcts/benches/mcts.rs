//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search with varying simulation counts
//! - Single random playouts
//! - Move generation cost underlying every simulation

use chess_core::{legal_moves, perft, Position, Square};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mcts::{playout, run_mcts, CaptureBiased, MctsConfig, UniformRandom};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::Duration;

/// An open game a few plies in.
fn midgame() -> Position {
    let moves = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("g1", "f3"),
        ("b8", "c6"),
        ("f1", "c4"),
        ("f8", "c5"),
    ];
    moves.iter().fold(Position::startpos(), |pos, &(from, to)| {
        let m = legal_moves(&pos)
            .into_iter()
            .find(|m| {
                m.from == Square::from_algebraic(from).unwrap()
                    && m.to == Square::from_algebraic(to).unwrap()
            })
            .unwrap();
        pos.apply_unchecked(m)
    })
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search");
    let config = MctsConfig::default().with_time_budget(Duration::from_secs(600));
    let policy = CaptureBiased::new(config.capture_bias);

    for sims in [50u32, 200, 500] {
        group.throughput(Throughput::Elements(sims as u64));
        group.bench_with_input(BenchmarkId::new("startpos", sims), &sims, |b, &sims| {
            let config = config.clone().with_simulations(sims);
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let result =
                    run_mcts(Position::startpos(), &policy, config.clone(), &mut rng).unwrap();
                black_box(result.mv)
            });
        });
    }
    group.finish();
}

fn bench_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout");
    let start = midgame();
    let uniform = UniformRandom;

    group.bench_function("uniform_depth_80", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        b.iter(|| black_box(playout(&start, &uniform, 80, &mut rng)));
    });
    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");
    let start = Position::startpos();

    group.bench_function("legal_moves_startpos", |b| {
        b.iter(|| black_box(legal_moves(&start)));
    });
    group.bench_function("perft_2", |b| {
        b.iter(|| black_box(perft(&start, 2)));
    });
    group.finish();
}

criterion_group!(benches, bench_search, bench_playout, bench_movegen);
criterion_main!(benches);
