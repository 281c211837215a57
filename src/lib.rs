pub mod dsp; // Filters, fades, noise and panning
pub mod synth; // Plucked-string rendering pipeline

pub use dsp::{mix_stereo, mix_stereo_into, BodyModel, NoiseSource, RandNoise, SeedNoise, StereoBuffer, TailFader};
pub use synth::{
    render, render_pluck, render_stereo, render_voices, PluckOptions, PluckRequest, RenderError,
    RenderParameters, StringMode,
};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
