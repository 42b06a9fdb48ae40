//! Criterion benchmarks for terrace-gam: evaluation, merging, diagnostics.

use criterion::{Criterion, criterion_group, criterion_main};

use terrace_gam::{AdditiveModel, Mode, StepFunction, Term, diagnose};

/// A step function over `attribute` with `n` evenly spaced breakpoints.
fn make_step(attribute: usize, n: usize, offset: f64) -> StepFunction {
    let mut splits: Vec<f64> = (0..n - 1).map(|i| offset + i as f64).collect();
    splits.push(f64::INFINITY);
    let predictions: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();
    StepFunction::new(attribute, splits, predictions, 0.0).unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let f = make_step(0, 1024, 0.0);
    c.bench_function("evaluate_1024_segments", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1000 {
                acc += f.evaluate(i as f64 * 1.037);
            }
            acc
        });
    });
}

fn bench_merge_add(c: &mut Criterion) {
    // Half-offset breakpoints so every interior split of `g` is new.
    let f = make_step(0, 512, 0.0);
    let g = make_step(0, 512, 0.5);
    c.bench_function("merge_add_512_disjoint_splits", |b| {
        b.iter(|| {
            let mut merged = f.clone();
            merged.merge_add(&g).unwrap();
            merged
        });
    });
}

fn bench_diagnose(c: &mut Criterion) {
    let mut model = AdditiveModel::new(0.0);
    for attribute in 0..20 {
        for round in 0..5 {
            model.push(
                Term::single(attribute),
                make_step(attribute, 64, round as f64 * 0.1),
            );
        }
    }
    let instances: Vec<Vec<f64>> = (0..500)
        .map(|i| (0..20).map(|a| ((i * 7 + a * 13) % 64) as f64).collect())
        .collect();

    c.bench_function("diagnose_20_terms_500_instances", |b| {
        b.iter(|| diagnose(&model, &instances, Mode::Variance));
    });
}

criterion_group!(benches, bench_evaluate, bench_merge_add, bench_diagnose);
criterion_main!(benches);
