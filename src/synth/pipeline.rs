//! Render pipeline: string → body → fade → pan.
//!
//! ```text
//!   RenderParameters + SeedNoise
//!            │
//!            ▼
//!   KarplusStrong (or decayed sine)  ──→  mono Vec<f32>
//!            │
//!            ▼
//!   BodyModel::apply      (in place, optional)
//!            │
//!            ▼
//!   TailFader::apply      (in place)
//!            │
//!            ▼
//!   mix_stereo            ──→  StereoBuffer { left, right }
//! ```
//!
//! Every call owns its buffers and filter state, so independent plucks can be
//! rendered on the rayon pool. The seed buffer is only ever read.

use rayon::prelude::*;

use crate::dsp::body::BodyModel;
use crate::dsp::fade::TailFader;
use crate::dsp::noise::{NoiseSource, RandNoise, SeedNoise};
use crate::dsp::pan::{mix_stereo, StereoBuffer};
use crate::synth::error::RenderError;
use crate::synth::karplus::{KarplusStrong, RenderParameters};
use crate::synth::options::{PluckOptions, StringMode};
use crate::synth::sine::render_decayed_sine;

/// Render one plucked string to a mono buffer of `out_len` samples.
///
/// The string is followed by `body` and the default 10% tail fade. Fresh noise
/// for `character_variation` comes from `noise`.
pub fn render(
    params: &RenderParameters,
    seed: &SeedNoise,
    out_len: usize,
    body: BodyModel,
    noise: &mut impl NoiseSource,
) -> Result<Vec<f32>, RenderError> {
    let renderer = KarplusStrong::new(*params, seed)?;
    if out_len == 0 {
        return Err(RenderError::EmptyOutput);
    }

    let mut out = vec![0.0; out_len];
    renderer.render(&mut out, noise)?;
    post_process(&mut out, params.sample_rate, body, &TailFader::default());
    Ok(out)
}

/// One note to be plucked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluckRequest {
    pub frequency: f32,
    pub velocity: f32,
    /// Output length in samples
    pub frames: usize,
    /// Stereo position, -1.0 (left) to 1.0 (right)
    pub location: f32,
}

impl PluckRequest {
    pub fn new(frequency: f32, frames: usize) -> Self {
        Self {
            frequency,
            velocity: 1.0,
            frames,
            location: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_location(mut self, location: f32) -> Self {
        self.location = location;
        self
    }
}

/// Render `request` to mono using `options` for tone, mode, body and fade.
pub fn render_pluck(
    sample_rate: u32,
    request: &PluckRequest,
    options: &PluckOptions,
    seed: &SeedNoise,
    noise: &mut impl NoiseSource,
) -> Result<Vec<f32>, RenderError> {
    let params = options.render_parameters(sample_rate, request.frequency, request.velocity);

    tracing::debug!(
        frequency = request.frequency,
        frames = request.frames,
        sample_rate,
        mode = ?options.mode,
        body = ?options.body,
        "rendering pluck"
    );

    let mut out = match options.mode {
        StringMode::KarplusStrong => {
            let renderer = KarplusStrong::new(params, seed)?;
            if request.frames == 0 {
                return Err(RenderError::EmptyOutput);
            }
            let mut out = vec![0.0; request.frames];
            renderer.render(&mut out, noise)?;
            out
        }
        StringMode::DecayedSine => {
            let mut out = vec![0.0; request.frames];
            render_decayed_sine(&params, &mut out)?;
            out
        }
    };

    post_process(&mut out, sample_rate, options.body, &options.tail_fader());
    Ok(out)
}

/// Render `request` and pan it into a stereo pair.
pub fn render_stereo(
    sample_rate: u32,
    request: &PluckRequest,
    options: &PluckOptions,
    seed: &SeedNoise,
    noise: &mut impl NoiseSource,
) -> Result<StereoBuffer, RenderError> {
    let mono = render_pluck(sample_rate, request, options, seed, noise)?;
    Ok(mix_stereo(&mono, options.stereo_spread, request.location))
}

/// Render independent plucks concurrently on the rayon thread pool.
///
/// Each pluck draws fresh noise from its worker's thread-local generator; all
/// of them share `seed` read-only. Results come back in request order. The
/// first failing request (in order) is returned as the error.
pub fn render_voices(
    sample_rate: u32,
    requests: &[PluckRequest],
    options: &PluckOptions,
    seed: &SeedNoise,
) -> Result<Vec<StereoBuffer>, RenderError> {
    tracing::debug!(
        voices = requests.len(),
        threads = rayon::current_num_threads(),
        "rendering voices in parallel"
    );

    let results: Vec<Result<StereoBuffer, RenderError>> = requests
        .par_iter()
        .map(|request| {
            let mut noise = RandNoise::thread_local();
            render_stereo(sample_rate, request, options, seed, &mut noise)
        })
        .collect();

    // Indexed collect keeps request order, so this picks the earliest error
    results.into_iter().collect()
}

fn post_process(buffer: &mut [f32], sample_rate: u32, body: BodyModel, fader: &TailFader) {
    body.apply(buffer, sample_rate);
    tracing::trace!(
        tail = fader.tail_samples(buffer.len()),
        "fading tail"
    );
    fader.apply(buffer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::noise::FixedNoise;

    fn ones(len: usize) -> SeedNoise {
        SeedNoise::from_samples(vec![1.0; len])
    }

    #[test]
    fn test_render_rejects_before_allocating() {
        let params = RenderParameters::new(44_100, 110.0);
        let mut noise = FixedNoise::silence();

        assert_eq!(
            render(&params, &ones(401), 0, BodyModel::None, &mut noise),
            Err(RenderError::EmptyOutput)
        );
        assert_eq!(
            render(
                &RenderParameters::new(0, 110.0),
                &ones(401),
                16,
                BodyModel::None,
                &mut noise
            ),
            Err(RenderError::InvalidSampleRate)
        );
        assert!(matches!(
            render(&params, &ones(10), 16, BodyModel::None, &mut noise),
            Err(RenderError::SeedTooShort { .. })
        ));
    }

    #[test]
    fn test_render_applies_fade() {
        let params = RenderParameters::new(44_100, 110.0);
        let out = render(
            &params,
            &ones(401),
            4_010,
            BodyModel::None,
            &mut FixedNoise::silence(),
        )
        .unwrap();

        let mut raw = vec![0.0; 4_010];
        KarplusStrong::new(params, &ones(401))
            .unwrap()
            .render(&mut raw, &mut FixedNoise::silence())
            .unwrap();

        assert_eq!(&out[..3_609], &raw[..3_609]);
        assert!(out[4_009].abs() < raw[4_009].abs() || raw[4_009] == 0.0);
    }

    #[test]
    fn test_body_changes_output() {
        let params = RenderParameters::new(44_100, 110.0);
        let seed = ones(401);
        let plain = render(&params, &seed, 2_000, BodyModel::None, &mut FixedNoise::silence()).unwrap();
        let body = render(&params, &seed, 2_000, BodyModel::Simple, &mut FixedNoise::silence()).unwrap();
        assert_ne!(plain, body);
    }

    #[test]
    fn test_decayed_sine_mode_ignores_seed_length() {
        let options = PluckOptions {
            mode: StringMode::DecayedSine,
            body: BodyModel::None,
            ..Default::default()
        };
        let request = PluckRequest::new(110.0, 1_000);
        let out = render_pluck(44_100, &request, &options, &SeedNoise::default(), &mut FixedNoise::silence())
            .unwrap();
        assert_eq!(out.len(), 1_000);
        assert!(out.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_render_stereo_pans_by_spread_and_location() {
        let options = PluckOptions {
            stereo_spread: 1.0,
            character_variation: 0.0,
            ..Default::default()
        };
        let request = PluckRequest::new(220.0, 1_000).with_location(-1.0);
        let seed = ones(200);

        let stereo = render_stereo(44_100, &request, &options, &seed, &mut FixedNoise::silence()).unwrap();
        let mono = render_pluck(44_100, &request, &options, &seed, &mut FixedNoise::silence()).unwrap();

        assert_eq!(stereo.left, mono);
        assert!(stereo.right.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_render_voices_keeps_order() {
        let options = PluckOptions {
            character_variation: 0.0,
            ..Default::default()
        };
        let seed = ones(401);
        let requests = [
            PluckRequest::new(110.0, 800).with_location(-1.0),
            PluckRequest::new(220.0, 600),
            PluckRequest::new(440.0, 400).with_location(1.0),
        ];

        let voices = render_voices(44_100, &requests, &options, &seed).unwrap();

        assert_eq!(voices.len(), 3);
        for (voice, request) in voices.iter().zip(requests.iter()) {
            assert_eq!(voice.frames(), request.frames);
        }
    }

    #[test]
    fn test_render_voices_handles_many_short_voices() {
        let options = PluckOptions {
            character_variation: 0.0,
            ..Default::default()
        };
        let seed = ones(100);
        let requests = vec![PluckRequest::new(440.0, 200); 5_000];

        let voices = render_voices(44_100, &requests, &options, &seed).unwrap();

        assert_eq!(voices.len(), 5_000);
        assert!(voices.iter().all(|voice| voice == &voices[0]));
        assert_eq!(voices[0].frames(), 200);
    }

    #[test]
    fn test_render_voices_reports_first_failure() {
        let options = PluckOptions::default();
        let seed = ones(401);
        let requests = [
            PluckRequest::new(110.0, 800),
            PluckRequest::new(-3.0, 800),
            PluckRequest::new(220.0, 0),
        ];

        let err = render_voices(44_100, &requests, &options, &seed).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFrequency { .. }));
    }
}
