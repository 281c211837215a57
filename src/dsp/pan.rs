//! Mono to stereo panning.

/*
Stereo Placement
================

Each rendered string is mono. To spread several strings across the stereo
field we give every voice an acoustic location and scale it by one global
spread control.

Vocabulary
----------

  location      Where a voice sits, from -1.0 (hard left) to +1.0 (hard
                right). On a guitar-like layout the lowest string gets -1 and
                the highest +1.

  spread        How wide the whole instrument sounds.
                  spread = 0.0  →  everything centered (mono)
                  spread = 1.0  →  locations used at full width

  pan           The effective position, spread × location.


The Math: Linear Pan
--------------------

    gain_left  = (1 - pan) / 2
    gain_right = (1 + pan) / 2

    pan = -1.0  →  L 1.0, R 0.0
    pan =  0.0  →  L 0.5, R 0.5
    pan = +1.0  →  L 0.0, R 1.0

The gains always sum to 1.0, same as the linear crossfade: a centered voice
sits 6 dB down in each channel. Location is clamped to [-1, 1] and the final
pan as well, so no channel ever gets a negative gain.
*/

use crate::synth::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoGains {
    pub left: f32,
    pub right: f32,
}

/// Left/right gains for a voice at `location` under a global `spread`.
#[inline]
pub fn stereo_gains(spread: f32, location: f32) -> StereoGains {
    let pan = (spread * location.clamp(-1.0, 1.0)).clamp(-1.0, 1.0);
    StereoGains {
        left: (1.0 - pan) * 0.5,
        right: (1.0 + pan) * 0.5,
    }
}

/// Two equal-length channels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StereoBuffer {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl StereoBuffer {
    pub fn silent(frames: usize) -> Self {
        Self {
            left: vec![0.0; frames],
            right: vec![0.0; frames],
        }
    }

    pub fn frames(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Samples as L, R, L, R, ...
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        self.left
            .iter()
            .zip(self.right.iter())
            .flat_map(|(&l, &r)| [l, r])
    }

    /// Add another buffer into this one, frame by frame.
    ///
    /// ⚠️ WARNING: Summed voices can exceed [-1.0, +1.0]!
    pub fn sum_in_place(&mut self, other: &StereoBuffer) {
        debug_assert_eq!(self.frames(), other.frames());

        for (a, &b) in self.left.iter_mut().zip(other.left.iter()) {
            *a += b;
        }
        for (a, &b) in self.right.iter_mut().zip(other.right.iter()) {
            *a += b;
        }
    }
}

/// Pan `mono` into freshly allocated left/right channels.
pub fn mix_stereo(mono: &[f32], spread: f32, location: f32) -> StereoBuffer {
    let gains = stereo_gains(spread, location);
    StereoBuffer {
        left: mono.iter().map(|&s| s * gains.left).collect(),
        right: mono.iter().map(|&s| s * gains.right).collect(),
    }
}

/// Pan `mono` into caller-provided channels of the same length.
pub fn mix_stereo_into(
    mono: &[f32],
    spread: f32,
    location: f32,
    left: &mut [f32],
    right: &mut [f32],
) -> Result<(), RenderError> {
    if left.len() != mono.len() || right.len() != mono.len() {
        return Err(RenderError::ChannelLengthMismatch {
            mono: mono.len(),
            left: left.len(),
            right: right.len(),
        });
    }

    let gains = stereo_gains(spread, location);
    for ((&s, l), r) in mono.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
        *l = s * gains.left;
        *r = s * gains.right;
    }
    Ok(())
}
