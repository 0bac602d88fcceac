use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knaves_rs::instance::PuzzleInstance;
use knaves_rs::solver::{Options, Solver};
use knaves_rs::translator::Translator;

/// A ring of n inhabitants, each claiming the next is a knave
///
/// With an even ring there are exactly two models.
fn ring_puzzle(n: usize) -> PuzzleInstance {
    let names: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
    let claims: Vec<(String, String)> = (0..n)
        .map(|i| (names[i].clone(), format!("{} is a knave", names[(i + 1) % n])))
        .collect();
    Translator::translate_puzzle(&names, &claims).unwrap()
}

/// n inhabitants with one tautological claim: 2^n models
fn open_puzzle(n: usize) -> PuzzleInstance {
    let names: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
    Translator::translate_puzzle(&names, &[("P0", "I am a knight")]).unwrap()
}

fn solver_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");

    for n in [4, 16, 64] {
        let puzzle = ring_puzzle(n);
        group.bench_with_input(BenchmarkId::new("ring", n), &puzzle, |b, puzzle| {
            b.iter(|| {
                let solver = Solver::new(Options::default());
                black_box(solver.solve(puzzle).unwrap());
            });
        });
    }

    let puzzle = open_puzzle(10);
    group.bench_function("free_variables_10", |b| {
        b.iter(|| {
            let solver = Solver::new(Options::default());
            black_box(solver.solve(&puzzle).unwrap());
        });
    });

    group.bench_function("first_model_of_1024", |b| {
        b.iter(|| {
            let solver = Solver::new(Options::default());
            black_box(solver.models(&puzzle).unwrap().next());
        });
    });

    group.finish();
}

criterion_group!(benches, solver_benchmarks);
criterion_main!(benches);
