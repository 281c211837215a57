//! Low-level DSP primitives used by the string renderer.
//!
//! These components are stateless functions or small state structs that run
//! over caller-owned buffers. They stay focused on the signal-processing math
//! so the pipeline in `synth` can layer ordering and validation on top.

/// Body resonance post-filter and its named body models.
pub mod body;
/// Linear fade over the end of a buffer.
pub mod fade;
/// One-pole low-pass smoothing stage.
pub mod lowpass;
/// Injectable noise sources and the seed excitation buffer.
pub mod noise;
/// Mono to stereo panning.
pub mod pan;

pub use body::BodyModel;
pub use fade::TailFader;
pub use noise::{FixedNoise, NoiseSource, RandNoise, SeedNoise};
pub use pan::{mix_stereo, mix_stereo_into, StereoBuffer};
