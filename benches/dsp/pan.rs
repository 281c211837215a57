//! Benchmarks for mono to stereo panning.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus_dsp::dsp::pan::{mix_stereo, mix_stereo_into};

use crate::BUFFER_SIZES;

pub fn bench_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pan");

    for &size in BUFFER_SIZES {
        let mono: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        // Allocating version (one Vec per channel)
        group.bench_with_input(BenchmarkId::new("mix_stereo", size), &size, |b, _| {
            b.iter(|| mix_stereo(black_box(&mono), black_box(0.2), black_box(-0.5)))
        });

        // Into caller-owned channels
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("mix_stereo_into", size), &size, |b, _| {
            b.iter(|| {
                mix_stereo_into(
                    black_box(&mono),
                    black_box(0.2),
                    black_box(-0.5),
                    black_box(&mut left),
                    black_box(&mut right),
                )
            })
        });
    }

    group.finish();
}
