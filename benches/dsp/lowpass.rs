//! Benchmarks for the one-pole smoothing stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus_dsp::dsp::lowpass::OnePole;

use crate::BUFFER_SIZES;

pub fn bench_lowpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lowpass");

    for &size in BUFFER_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| ((i % 100) as f32 / 50.0) - 1.0)
            .collect();

        let mut stage = OnePole::new(0.5);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                stage.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
