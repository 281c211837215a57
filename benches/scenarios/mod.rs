//! Full-pipeline benchmarks.
//!
//! These render complete plucks the way a caller would: string, body, fade
//! and pan, alone and several voices at once.

mod pluck;
mod voices;

pub use pluck::bench_pluck;
pub use voices::bench_voices;
