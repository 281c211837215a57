pub mod error;
pub mod karplus;
pub mod options;
pub mod pipeline;
pub mod sine;

pub use error::RenderError;
pub use karplus::{KarplusStrong, RenderParameters};
pub use options::{PluckOptions, StringMode};
pub use pipeline::{render, render_pluck, render_stereo, render_voices, PluckRequest};
