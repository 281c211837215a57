//! pluck - render a single Karplus-Strong string
//!
//! Run with: cargo run -- --frequency 110 --wav pluck.wav

mod playback;

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use tracing::level_filters::LevelFilter;

use karplus_dsp::{
    render_stereo, BodyModel, PluckOptions, PluckRequest, RandNoise, SeedNoise, StereoBuffer,
    StringMode, DEFAULT_SAMPLE_RATE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(name = "pluck")]
#[command(about = "Render a plucked string with Karplus-Strong synthesis", long_about = None)]
struct Cli {
    /// Pitch in Hz
    #[arg(short, long, default_value = "110.0")]
    frequency: f32,

    /// Loudness 0.0-1.0
    #[arg(short, long, default_value = "1.0")]
    velocity: f32,

    /// Length of the render in seconds
    #[arg(short = 'd', long, default_value = "2.0")]
    seconds: f32,

    /// Sample rate for WAV output (playback uses the device rate)
    #[arg(short, long)]
    sample_rate: Option<u32>,

    /// Stereo position, -1.0 (left) to 1.0 (right)
    #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
    location: f32,

    /// TOML file with tone settings (see PluckOptions)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override the body model
    #[arg(long)]
    body: Option<BodyArg>,

    /// Override the synthesis mode
    #[arg(long)]
    mode: Option<ModeArg>,

    /// Override string tension
    #[arg(long, allow_negative_numbers = true)]
    tension: Option<f32>,

    /// Override character variation
    #[arg(long)]
    character_variation: Option<f32>,

    /// Seed the noise generators for a reproducible render
    #[arg(long)]
    seed: Option<u64>,

    /// Write a 16-bit stereo WAV here instead of playing
    #[arg(short, long)]
    wav: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'V', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum BodyArg {
    None,
    Simple,
}

impl From<BodyArg> for BodyModel {
    fn from(arg: BodyArg) -> Self {
        match arg {
            BodyArg::None => BodyModel::None,
            BodyArg::Simple => BodyModel::Simple,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    KarplusStrong,
    DecayedSine,
}

impl From<ModeArg> for StringMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::KarplusStrong => StringMode::KarplusStrong,
            ModeArg::DecayedSine => StringMode::DecayedSine,
        }
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let options = load_options(&cli)?;

    match &cli.wav {
        Some(path) => {
            let sample_rate = cli.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
            let stereo = render(&cli, &options, sample_rate)?;
            write_wav(path, &stereo, sample_rate)?;
            tracing::info!(path = %path.display(), frames = stereo.frames(), "wrote wav");
        }
        None => {
            let sample_rate = playback::device_sample_rate()?;
            let stereo = render(&cli, &options, sample_rate)?;
            playback::play(&stereo)?;
        }
    }

    Ok(())
}

fn load_options(cli: &Cli) -> EyreResult<PluckOptions> {
    let mut options = match &cli.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read options from {}", path.display()))?;
            toml::from_str(&text)
                .wrap_err_with(|| format!("failed to parse options in {}", path.display()))?
        }
        None => PluckOptions::default(),
    };

    if let Some(body) = cli.body {
        options.body = body.into();
    }
    if let Some(mode) = cli.mode {
        options.mode = mode.into();
    }
    if let Some(tension) = cli.tension {
        options.string_tension = tension;
    }
    if let Some(variation) = cli.character_variation {
        options.character_variation = variation;
    }

    tracing::debug!(?options, "resolved pluck options");
    Ok(options)
}

fn render(cli: &Cli, options: &PluckOptions, sample_rate: u32) -> EyreResult<StereoBuffer> {
    let frames = frame_count(cli.seconds, sample_rate)?;

    let request = PluckRequest::new(cli.frequency, frames)
        .with_velocity(cli.velocity)
        .with_location(cli.location);

    let stereo = match cli.seed {
        Some(seed) => {
            let mut noise = RandNoise::new(StdRng::seed_from_u64(seed));
            let seed_noise = SeedNoise::for_pitch(sample_rate, cli.frequency, &mut noise)?;
            render_stereo(sample_rate, &request, options, &seed_noise, &mut noise)?
        }
        None => {
            let mut noise = RandNoise::thread_local();
            let seed_noise = SeedNoise::for_pitch(sample_rate, cli.frequency, &mut noise)?;
            render_stereo(sample_rate, &request, options, &seed_noise, &mut noise)?
        }
    };

    tracing::info!(
        frequency = cli.frequency,
        sample_rate,
        frames,
        "rendered pluck"
    );
    Ok(stereo)
}

/// Longest render the CLI will allocate.
const MAX_SECONDS: f32 = 600.0;

fn frame_count(seconds: f32, sample_rate: u32) -> EyreResult<usize> {
    if !(seconds.is_finite() && seconds > 0.0 && seconds <= MAX_SECONDS) {
        return Err(eyre!(
            "duration must be between 0 and {} seconds, got {}",
            MAX_SECONDS,
            seconds
        ));
    }
    Ok((seconds as f64 * sample_rate as f64).round() as usize)
}

fn write_wav(path: &Path, stereo: &StereoBuffer, sample_rate: u32) -> EyreResult<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .wrap_err_with(|| format!("failed to create {}", path.display()))?;

    for sample in stereo.interleaved() {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize().wrap_err("failed to finalize WAV file")?;
    Ok(())
}
