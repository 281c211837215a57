//! Benchmarks for the tail fade.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus_dsp::dsp::fade::TailFader;

use crate::BUFFER_SIZES;

pub fn bench_fade(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fade");
    let fader = TailFader::default();

    for &size in BUFFER_SIZES {
        let mut buffer = vec![1.0f32; size];
        group.bench_with_input(BenchmarkId::new("tail_10pct", size), &size, |b, _| {
            b.iter(|| {
                buffer.fill(1.0);
                fader.apply(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
