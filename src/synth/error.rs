/// Errors reported before any sample is rendered
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Sample rate was zero
    InvalidSampleRate,
    /// Frequency was not a positive finite number, or so high that the period
    /// rounds to zero samples
    InvalidFrequency { frequency: f32, sample_rate: u32 },
    /// Requested output length was zero
    EmptyOutput,
    /// Seed noise shorter than one period
    SeedTooShort { needed: usize, actual: usize },
    /// Stereo destination buffers don't match the mono source
    ChannelLengthMismatch {
        mono: usize,
        left: usize,
        right: usize,
    },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::InvalidSampleRate => write!(f, "Sample rate must be greater than zero"),
            RenderError::InvalidFrequency {
                frequency,
                sample_rate,
            } => {
                write!(
                    f,
                    "Invalid frequency {} Hz at {} Hz sample rate (must be positive and at most twice the sample rate)",
                    frequency, sample_rate
                )
            }
            RenderError::EmptyOutput => write!(f, "Output length must be greater than zero"),
            RenderError::SeedTooShort { needed, actual } => {
                write!(
                    f,
                    "Seed noise too short: need {} samples for one period, got {}",
                    needed, actual
                )
            }
            RenderError::ChannelLengthMismatch { mono, left, right } => {
                write!(
                    f,
                    "Channel length mismatch: mono has {} samples, left {}, right {}",
                    mono, left, right
                )
            }
        }
    }
}

impl std::error::Error for RenderError {}
