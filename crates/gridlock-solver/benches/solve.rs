//! End-to-end solve benchmark.
//!
//! Measures setting up the fixture givens and completing the board.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solve
//! ```

use std::hint;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gridlock_solver::testing::easy_puzzle;

fn bench_solve_easy(c: &mut Criterion) {
    c.bench_function("solve_easy_fixture", |b| {
        b.iter_batched_ref(
            || hint::black_box(easy_puzzle()),
            |puzzle| {
                puzzle.solve().unwrap();
                hint::black_box(puzzle.is_complete())
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_setup_only(c: &mut Criterion) {
    c.bench_function("assign_fixture_givens", |b| {
        b.iter(|| hint::black_box(easy_puzzle()));
    });
}

criterion_group!(benches, bench_solve_easy, bench_setup_only);
criterion_main!(benches);
