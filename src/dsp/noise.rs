//! Noise sources and the seed excitation buffer.
//!
//! Two kinds of randomness feed a pluck:
//!
//! - **Seed noise**: a buffer of white noise generated once (typically per
//!   string) and replayed on every pluck. It gives a string a stable
//!   "character" from note to note.
//! - **Fresh noise**: drawn per sample while seeding, and blended into the seed
//!   according to `character_variation` so repeated plucks are not identical.
//!
//! Fresh noise comes through the [`NoiseSource`] trait so callers choose the
//! generator: [`RandNoise`] wraps any `rand::Rng` (thread-local by default,
//! seeded for reproducible renders) and [`FixedNoise`] replays a fixed sequence.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::synth::error::RenderError;

/// Longest seed `SeedNoise::for_pitch` will build, in seconds of audio.
/// One period that long is a pitch of 0.1 Hz.
pub const MAX_SEED_SECONDS: f64 = 10.0;

/// Source of uniform bipolar noise.
pub trait NoiseSource {
    /// Next sample, uniform in [-1, 1].
    fn next_bipolar(&mut self) -> f32;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_bipolar(&mut self) -> f32 {
        (**self).next_bipolar()
    }
}

/// Noise drawn from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandNoise<R> {
    rng: R,
}

impl<R: Rng> RandNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RandNoise<ThreadRng> {
    /// Generator local to the calling thread; each worker gets its own.
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> NoiseSource for RandNoise<R> {
    #[inline]
    fn next_bipolar(&mut self) -> f32 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

/// Replays a fixed sequence, wrapping around at the end.
///
/// An empty sequence yields silence.
#[derive(Debug, Clone, Default)]
pub struct FixedNoise {
    samples: Vec<f32>,
    position: usize,
    drawn: usize,
}

impl FixedNoise {
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            position: 0,
            drawn: 0,
        }
    }

    pub fn silence() -> Self {
        Self::default()
    }

    /// How many samples have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl NoiseSource for FixedNoise {
    fn next_bipolar(&mut self) -> f32 {
        self.drawn += 1;
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.position];
        self.position = (self.position + 1) % self.samples.len();
        sample
    }
}

/// Read-only excitation buffer replayed at the start of each pluck.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeedNoise {
    samples: Vec<f32>,
}

impl SeedNoise {
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    /// `len` samples of white noise from `noise`.
    pub fn white(len: usize, noise: &mut impl NoiseSource) -> Self {
        let samples = (0..len).map(|_| noise.next_bipolar()).collect();
        Self { samples }
    }

    /// White noise long enough to seed any pitch at or above `lowest_frequency`.
    ///
    /// Pitches whose period exceeds [`MAX_SEED_SECONDS`] are rejected.
    pub fn for_pitch(
        sample_rate: u32,
        lowest_frequency: f32,
        noise: &mut impl NoiseSource,
    ) -> Result<Self, RenderError> {
        if sample_rate == 0 {
            return Err(RenderError::InvalidSampleRate);
        }
        if !(lowest_frequency.is_finite() && lowest_frequency > 0.0) {
            return Err(RenderError::InvalidFrequency {
                frequency: lowest_frequency,
                sample_rate,
            });
        }

        let len = (sample_rate as f64 / lowest_frequency as f64).ceil().max(1.0);
        if len > sample_rate as f64 * MAX_SEED_SECONDS {
            return Err(RenderError::InvalidFrequency {
                frequency: lowest_frequency,
                sample_rate,
            });
        }
        Ok(Self::white(len as usize, noise))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }
}

impl AsRef<[f32]> for SeedNoise {
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}

impl From<Vec<f32>> for SeedNoise {
    fn from(samples: Vec<f32>) -> Self {
        Self::from_samples(samples)
    }
}
