//! Decayed sine: a reference tone with the same pitch and length as a pluck.
//!
//! Useful for auditioning the body filter, fade and panning without the
//! waveguide, and as a sanity check that pitch and buffer sizing line up.
//!
//! ```text
//! out[t] = velocity · 2^(-t / (N/8)) · sin(2π · f · t / sample_rate)
//! ```
//!
//! The amplitude halves every eighth of the buffer, so whatever the length the
//! tone has dropped by 48 dB at the end.

use std::f64::consts::TAU;

use crate::synth::error::RenderError;
use crate::synth::karplus::{period_samples, RenderParameters};

/// Fill `out` with an exponentially decaying sine at `params.frequency`.
///
/// Only `sample_rate`, `frequency` and `velocity` are used.
pub fn render_decayed_sine(params: &RenderParameters, out: &mut [f32]) -> Result<(), RenderError> {
    period_samples(params.sample_rate, params.frequency)?;
    if out.is_empty() {
        return Err(RenderError::EmptyOutput);
    }

    let half_life = out.len() as f64 / 8.0;
    let sample_rate = params.sample_rate as f64;
    let frequency = params.frequency as f64;
    let velocity = params.velocity as f64;

    for (t, sample) in out.iter_mut().enumerate() {
        let t = t as f64;
        let envelope = (-t / half_life).exp2();
        *sample = (velocity * envelope * (TAU * frequency * t / sample_rate).sin()) as f32;
    }

    Ok(())
}
