//! Benchmarks for a single pluck through the whole pipeline.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus_dsp::dsp::noise::{FixedNoise, RandNoise, SeedNoise};
use karplus_dsp::{render, render_stereo, BodyModel, PluckOptions, PluckRequest, RenderParameters};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_pluck(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pluck");

    let mut seed_rng = RandNoise::new(StdRng::seed_from_u64(1));
    let seed = SeedNoise::for_pitch(SAMPLE_RATE, 55.0, &mut seed_rng).expect("valid pitch");
    let params = RenderParameters::new(SAMPLE_RATE, 110.0);

    for &size in BUFFER_SIZES {
        // === RAW STRING ===
        // Waveguide + fade only, no fresh noise
        group.bench_with_input(BenchmarkId::new("string_only", size), &size, |b, _| {
            b.iter(|| {
                render(
                    black_box(&params),
                    black_box(&seed),
                    black_box(size),
                    BodyModel::None,
                    &mut FixedNoise::silence(),
                )
            })
        });

        // === STRING + BODY ===
        group.bench_with_input(BenchmarkId::new("string_body", size), &size, |b, _| {
            b.iter(|| {
                render(
                    black_box(&params),
                    black_box(&seed),
                    black_box(size),
                    BodyModel::Simple,
                    &mut FixedNoise::silence(),
                )
            })
        });

        // === FULL STEREO PLUCK ===
        // Default options: character variation draws fresh noise per seed sample
        let options = PluckOptions::default();
        let request = PluckRequest::new(110.0, size).with_location(-0.5);
        let mut noise = RandNoise::new(StdRng::seed_from_u64(2));
        group.bench_with_input(BenchmarkId::new("stereo_default", size), &size, |b, _| {
            b.iter(|| {
                render_stereo(
                    black_box(SAMPLE_RATE),
                    black_box(&request),
                    black_box(&options),
                    black_box(&seed),
                    &mut noise,
                )
            })
        });
    }

    group.finish();
}
