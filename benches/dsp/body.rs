//! Benchmarks for the body resonance filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus_dsp::dsp::body::BodyModel;

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/body");

    for &size in BUFFER_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("simple", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                BodyModel::Simple.apply(black_box(&mut buffer), black_box(SAMPLE_RATE));
            })
        });
    }

    group.finish();
}
