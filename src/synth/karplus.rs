use crate::dsp::lowpass::OnePole;
use crate::dsp::noise::{NoiseSource, SeedNoise};
use crate::synth::error::RenderError;

/*
Karplus-Strong Plucked String
=============================

A plucked string is a delay line that feeds back into itself through a gentle
low-pass filter. Fill the line with noise, let it recirculate, and the noise
settles into a pitched, decaying tone.

Vocabulary
----------

  period        Samples per cycle of the target pitch:
                    period = round(sample_rate / frequency)
                This is the delay-line length. 110 Hz at 44.1 kHz → 401.

  seed phase    The first `period` output samples. Noise is injected here
                (the pluck). Nothing is fed back yet.

  feedback      Every later sample reads the output from one period ago,
  phase         smooths it, and writes it again. That loop is the string.

  tension       Shifts the feedback tap by round(tension × period) samples.
                A positive shift reads a newer sample (shorter loop, higher,
                brighter); negative reads an older one (lower, darker).


The Recurrence
--------------

  out  ─────────────────────────────────────────────────────────→
        [ seed phase: period samples ][ feedback phase ......... ]
                                       ↑
           t - period + skip ──────────┘ (read)         t (write)

  seed phase:      in[t] = LP_pluck( seed[t]·(1-cv) + cv·fresh() ) · velocity
  feedback phase:  in[t] = out[t - period + skip]
  every sample:    out[t] = LP_smooth( in[t] )

Both LP stages are the one-pole filter from `dsp::lowpass`, each with its own
running state. The smoothing stage sees every sample, so each trip around the
loop removes a bit more treble: the higher harmonics die first, just like a
real string.


Character Variation
-------------------

  cv = 0.0  →  seed buffer only: every pluck is identical
  cv = 1.0  →  fresh noise only: the seed buffer is ignored

With cv = 0 the noise source is never consulted, so the render is a pure
function of the seed and parameters.


Tap Bounds
----------

The shifted tap must land in samples already written, [0, t-1]. A negative
skip reaches before the start of the buffer for the first few feedback
samples; a skip of a full period or more would read the future. Both are
clamped into range.
*/

/// Everything needed to render one pluck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    pub sample_rate: u32,
    pub frequency: f32,
    /// Amplitude scalar applied to the excitation, typically 0.0-1.0
    pub velocity: f32,
    /// Loop filter coefficient (0.0-1.0). Lower = darker, faster decay.
    pub smoothing_factor: f32,
    /// Feedback tap shift as a fraction of the period
    pub string_tension: f32,
    /// Excitation filter coefficient (0.0-1.0). Lower = softer pluck.
    pub pluck_damping: f32,
    /// Blend between seed noise (0.0) and fresh noise (1.0)
    pub character_variation: f32,
}

impl RenderParameters {
    pub fn new(sample_rate: u32, frequency: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity: 1.0,
            smoothing_factor: 0.5,
            string_tension: 0.0,
            pluck_damping: 0.5,
            character_variation: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_smoothing_factor(mut self, smoothing_factor: f32) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    pub fn with_string_tension(mut self, string_tension: f32) -> Self {
        self.string_tension = string_tension;
        self
    }

    pub fn with_pluck_damping(mut self, pluck_damping: f32) -> Self {
        self.pluck_damping = pluck_damping;
        self
    }

    pub fn with_character_variation(mut self, character_variation: f32) -> Self {
        self.character_variation = character_variation;
        self
    }

    /// Delay-line length in samples, validating rate and frequency.
    pub fn period_samples(&self) -> Result<usize, RenderError> {
        period_samples(self.sample_rate, self.frequency)
    }
}

/// `round(sample_rate / frequency)`, rejecting inputs that give no period.
pub fn period_samples(sample_rate: u32, frequency: f32) -> Result<usize, RenderError> {
    if sample_rate == 0 {
        return Err(RenderError::InvalidSampleRate);
    }

    let invalid = RenderError::InvalidFrequency {
        frequency,
        sample_rate,
    };
    if !(frequency.is_finite() && frequency > 0.0) {
        return Err(invalid);
    }

    let period = (sample_rate as f64 / frequency as f64).round();
    if period < 1.0 {
        return Err(invalid);
    }
    Ok(period as usize)
}

/// Waveguide renderer bound to one set of parameters and a seed buffer.
#[derive(Debug, Clone)]
pub struct KarplusStrong<'a> {
    params: RenderParameters,
    seed: &'a SeedNoise,
    period: usize,
    tension_skip: isize,
}

impl<'a> KarplusStrong<'a> {
    pub fn new(params: RenderParameters, seed: &'a SeedNoise) -> Result<Self, RenderError> {
        let period = params.period_samples()?;
        if seed.len() < period {
            return Err(RenderError::SeedTooShort {
                needed: period,
                actual: seed.len(),
            });
        }

        let tension_skip = (params.string_tension * period as f32).round() as isize;
        if tension_skip >= period as isize {
            tracing::warn!(
                tension = params.string_tension,
                skip = tension_skip,
                period,
                "string tension reaches past the write head; feedback tap will be clamped"
            );
        }

        Ok(Self {
            params,
            seed,
            period,
            tension_skip,
        })
    }

    pub fn period_samples(&self) -> usize {
        self.period
    }

    /// Tap offset from one period ago, in samples.
    pub fn tension_skip(&self) -> isize {
        self.tension_skip
    }

    /// Index read by the feedback phase when writing `target`, clamped to
    /// the samples already written.
    #[inline]
    pub fn feedback_tap(&self, target: usize) -> usize {
        debug_assert!(target >= self.period);
        // The skip saturates for extreme tensions; so does the tap
        let tap = (target as isize - self.period as isize).saturating_add(self.tension_skip);
        tap.clamp(0, target as isize - 1) as usize
    }

    /// Fill `out` with the plucked string, overwriting its contents.
    pub fn render(&self, out: &mut [f32], noise: &mut impl NoiseSource) -> Result<(), RenderError> {
        if out.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        let RenderParameters {
            velocity,
            smoothing_factor,
            pluck_damping,
            character_variation,
            ..
        } = self.params;

        tracing::trace!(
            frames = out.len(),
            period = self.period,
            skip = self.tension_skip,
            feedback = out.len() > self.period,
            "rendering karplus-strong"
        );

        let seed = self.seed.as_slice();
        let mut pluck = OnePole::new(pluck_damping);
        let mut smooth = OnePole::new(smoothing_factor);

        for t in 0..out.len() {
            let input = if t < self.period {
                let mut excitation = seed[t];
                if character_variation != 0.0 {
                    excitation *= 1.0 - character_variation;
                    excitation += character_variation * noise.next_bipolar();
                }
                pluck.next_sample(excitation * velocity)
            } else {
                out[self.feedback_tap(t)]
            };

            out[t] = smooth.next_sample(input);
        }

        Ok(())
    }
}
