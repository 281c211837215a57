#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::body::BodyModel;
use crate::dsp::fade::{TailFader, DEFAULT_TAIL_PROPORTION};
use crate::synth::karplus::RenderParameters;

/// Which synthesis routine renders the string.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringMode {
    #[default]
    KarplusStrong,
    DecayedSine,
}

/// Tone-shaping settings shared by every pluck of an instrument.
///
/// Missing fields fall back to [`PluckOptions::default`] when deserialized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluckOptions {
    pub smoothing_factor: f32,
    pub string_tension: f32,
    pub pluck_damping: f32,
    pub character_variation: f32,
    /// Global pan width, multiplied by each voice's location
    pub stereo_spread: f32,
    pub body: BodyModel,
    pub mode: StringMode,
    /// Share of the buffer faded out at the end
    pub tail_proportion: f64,
}

impl Default for PluckOptions {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.5,
            string_tension: 0.0,
            pluck_damping: 0.5,
            character_variation: 0.5,
            stereo_spread: 0.2,
            body: BodyModel::Simple,
            mode: StringMode::KarplusStrong,
            tail_proportion: DEFAULT_TAIL_PROPORTION,
        }
    }
}

impl PluckOptions {
    /// Parameters for one pluck at `frequency` with these settings.
    pub fn render_parameters(&self, sample_rate: u32, frequency: f32, velocity: f32) -> RenderParameters {
        RenderParameters {
            sample_rate,
            frequency,
            velocity,
            smoothing_factor: self.smoothing_factor,
            string_tension: self.string_tension,
            pluck_damping: self.pluck_damping,
            character_variation: self.character_variation,
        }
    }

    pub fn tail_fader(&self) -> TailFader {
        TailFader::new(self.tail_proportion)
    }
}
