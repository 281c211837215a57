//! Benchmarks for low-level DSP primitives.

mod body;
mod fade;
mod lowpass;
mod pan;

pub use body::bench_body;
pub use fade::bench_fade;
pub use lowpass::bench_lowpass;
pub use pan::bench_pan;
