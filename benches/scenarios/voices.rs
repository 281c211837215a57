//! Benchmarks for rendering several strings at once.
//!
//! Compares rendering a four-string chord one voice after another against
//! `render_voices`, which spreads the voices over the rayon thread pool.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus_dsp::dsp::noise::{RandNoise, SeedNoise};
use karplus_dsp::{render_stereo, render_voices, PluckOptions, PluckRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    let mut seed_rng = RandNoise::new(StdRng::seed_from_u64(1));
    let seed = SeedNoise::for_pitch(SAMPLE_RATE, 55.0, &mut seed_rng).expect("valid pitch");
    let options = PluckOptions::default();

    for &size in BUFFER_SIZES {
        // D3 G3 B3 E4, spread low to high
        let requests = [
            PluckRequest::new(146.83, size).with_location(-1.0),
            PluckRequest::new(196.00, size).with_location(-0.33),
            PluckRequest::new(246.94, size).with_location(0.33),
            PluckRequest::new(329.63, size).with_location(1.0),
        ];

        let mut noise = RandNoise::new(StdRng::seed_from_u64(3));
        group.bench_with_input(BenchmarkId::new("4_voice_sequential", size), &size, |b, _| {
            b.iter(|| {
                requests
                    .iter()
                    .map(|request| {
                        render_stereo(SAMPLE_RATE, black_box(request), &options, &seed, &mut noise)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
        });

        group.bench_with_input(BenchmarkId::new("4_voice_parallel", size), &size, |b, _| {
            b.iter(|| render_voices(SAMPLE_RATE, black_box(&requests), &options, &seed))
        });
    }

    group.finish();
}
