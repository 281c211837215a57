//! Play a rendered buffer through the default output device.
//!
//! The main thread feeds interleaved stereo frames into a lock-free ring
//! buffer; the audio callback only pops, so it never blocks or allocates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use karplus_dsp::StereoBuffer;

/// Frames of headroom between the feeder and the callback.
const RING_FRAMES: usize = 8_192;

fn default_device() -> EyreResult<cpal::Device> {
    cpal::default_host()
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))
}

pub fn device_sample_rate() -> EyreResult<u32> {
    let config = default_device()?
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    Ok(config.sample_rate().0)
}

pub fn play(stereo: &StereoBuffer) -> EyreResult<()> {
    let device = default_device()?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let channels = config.channels() as usize;

    tracing::info!(
        sample_rate = config.sample_rate().0,
        channels,
        frames = stereo.frames(),
        "playing"
    );

    let (mut producer, mut consumer) = RingBuffer::<[f32; 2]>::new(RING_FRAMES);
    let finished = Arc::new(AtomicBool::new(false));
    let drained = Arc::new(AtomicBool::new(false));

    let finished_cb = finished.clone();
    let drained_cb = drained.clone();
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(channels) {
                let [left, right] = match consumer.pop() {
                    Ok(pair) => pair,
                    Err(_) => {
                        if finished_cb.load(Ordering::Acquire) {
                            drained_cb.store(true, Ordering::Release);
                        }
                        [0.0, 0.0]
                    }
                };

                match frame {
                    [mono] => *mono = 0.5 * (left + right),
                    [l, r, rest @ ..] => {
                        *l = left;
                        *r = right;
                        rest.fill(0.0);
                    }
                    [] => {}
                }
            }
        },
        |err| tracing::error!(%err, "audio stream error"),
        None,
    )?;

    stream.play()?;

    for (&left, &right) in stereo.left.iter().zip(stereo.right.iter()) {
        let mut pair = [left, right];
        loop {
            match producer.push(pair) {
                Ok(()) => break,
                Err(rtrb::PushError::Full(rejected)) => {
                    pair = rejected;
                    std::thread::sleep(Duration::from_millis(5));
                }
            }
        }
    }
    finished.store(true, Ordering::Release);

    while !drained.load(Ordering::Acquire) {
        std::thread::sleep(Duration::from_millis(10));
    }

    Ok(())
}
