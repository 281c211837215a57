//! Body resonance post-filter.
//!
//! A plucked string on its own sounds thin. Real instruments couple the string
//! to a hollow body that rings along at a few low frequencies, thickening the
//! attack and adding a soft "thump". This module models that with a pair of
//! damped, gently saturating resonators driven by the rendered string signal.
//!
//! # Signal Flow
//!
//! ```text
//!   x[n] ──┬────────────────────────────┐
//!          │                            │
//!          ├─→ resonator A (3.44 Hz) ─┐ │
//!          │                          ├─┼─→ × wet_gain ─→ (+) ─→ high-pass ─→ y[n]
//!          └─→ resonator B (6.12 Hz) ─┘ │                  ↑
//!                                       └──────────────────┘
//! ```
//!
//! Each resonator is a two-state recursion (velocity, position). The velocity
//! leaks by `damping` every sample and is pushed toward the previous input;
//! the position integrates the velocity and is then softly clipped with the
//! first two terms of the sine series, `p - p³/6`, so loud plucks bend the
//! response instead of blowing it up.
//!
//! The final first-order high-pass (`y = k·y' + k·(x - x')`) removes the DC
//! offset the resonators would otherwise leave behind.
//!
//! # Tuning
//!
//! Resonator coefficients follow `2·sin(π·f / sample_rate)`, so the response
//! scales with the host sample rate. State always starts at zero: an all-zero
//! input yields an all-zero output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cubic soft-clip coefficient (1/3!).
const SATURATION: f64 = 0.166666666666666;

/// Which body model to run over a rendered string.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyModel {
    /// Raw waveguide output, no body.
    None,
    /// Two fixed low resonances plus DC-blocking high-pass.
    #[default]
    Simple,
}

/// One damped resonance inside a body model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResonatorMode {
    pub frequency_hz: f64,
    pub damping: f64,
}

/// Named constants describing a body model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCoefficients {
    pub modes: [ResonatorMode; 2],
    /// Gain applied to the summed resonator output before mixing back in.
    pub wet_gain: f64,
    /// Feedback and feed-forward coefficient of the closing high-pass.
    pub highpass: f64,
}

pub const SIMPLE_BODY: BodyCoefficients = BodyCoefficients {
    modes: [
        ResonatorMode {
            frequency_hz: 3.4375,
            damping: 0.98,
        },
        ResonatorMode {
            frequency_hz: 6.124928687214833,
            damping: 0.98,
        },
    ],
    wet_gain: 2.0,
    highpass: 0.99,
};

impl BodyModel {
    pub fn coefficients(self) -> Option<&'static BodyCoefficients> {
        match self {
            BodyModel::None => None,
            BodyModel::Simple => Some(&SIMPLE_BODY),
        }
    }

    /// Run this body over `buffer` in place. `BodyModel::None` leaves it untouched.
    ///
    /// `sample_rate` must be non-zero; the resonator tuning divides by it.
    pub fn apply(self, buffer: &mut [f32], sample_rate: u32) {
        if let Some(coefficients) = self.coefficients() {
            tracing::trace!(body = ?self, frames = buffer.len(), "applying body resonance");
            BodyResonanceFilter::new(coefficients, sample_rate).render(buffer);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Resonator {
    coefficient: f64,
    damping: f64,
    velocity: f64,
    position: f64,
}

impl Resonator {
    fn new(mode: &ResonatorMode, sample_rate: u32) -> Self {
        let coefficient =
            2.0 * (std::f64::consts::PI * mode.frequency_hz / sample_rate as f64).sin();
        Self {
            coefficient,
            damping: mode.damping,
            velocity: 0.0,
            position: 0.0,
        }
    }

    #[inline]
    fn next(&mut self, excitation: f64) -> f64 {
        self.velocity *= self.damping;
        self.velocity += (excitation - self.position) * self.coefficient;
        self.position += self.velocity;
        self.position -= self.position * self.position * self.position * SATURATION;
        self.position
    }
}

pub struct BodyResonanceFilter {
    resonators: [Resonator; 2],
    wet_gain: f64,
    highpass: f64,
    // Resonators are driven by the previous input sample
    last_excitation: f64,
    last_input: f64,
    last_output: f64,
}

impl BodyResonanceFilter {
    /// Panics in debug builds if `sample_rate` is zero.
    pub fn new(coefficients: &BodyCoefficients, sample_rate: u32) -> Self {
        debug_assert!(sample_rate > 0, "body filter needs a non-zero sample rate");
        let [a, b] = &coefficients.modes;
        Self {
            resonators: [Resonator::new(a, sample_rate), Resonator::new(b, sample_rate)],
            wet_gain: coefficients.wet_gain,
            highpass: coefficients.highpass,
            last_excitation: 0.0,
            last_input: 0.0,
            last_output: 0.0,
        }
    }

    pub fn simple(sample_rate: u32) -> Self {
        Self::new(&SIMPLE_BODY, sample_rate)
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let excitation = self.last_excitation;
        let body: f64 = self
            .resonators
            .iter_mut()
            .map(|resonator| resonator.next(excitation))
            .sum();

        let dry = sample as f64;
        self.last_excitation = dry;

        // Stored at buffer precision before the high-pass, as the output is
        let combined = (dry + body * self.wet_gain) as f32 as f64;
        let output =
            (self.highpass * self.last_output + self.highpass * (combined - self.last_input)) as f32;

        self.last_input = combined;
        self.last_output = output as f64;
        output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        for resonator in &mut self.resonators {
            resonator.velocity = 0.0;
            resonator.position = 0.0;
        }
        self.last_excitation = 0.0;
        self.last_input = 0.0;
        self.last_output = 0.0;
    }
}
