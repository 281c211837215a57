//! One-pole low-pass smoothing stage.

/*
One-Pole Low-Pass
=================

The smallest useful filter: each output sample is a weighted blend of the
new input and the previous output.

    y[n] = a * x[n] + (1 - a) * y[n-1]

    a = smoothing factor

  a = 1.0   →  output follows input exactly (no smoothing)
  a = 0.5   →  half new, half history (gentle treble roll-off)
  a = 0.0   →  output frozen at its last value

Because every sample keeps a share of the past, fast wiggles (high
frequencies) are averaged away while slow movement (low frequencies) passes.


Why It Matters for Plucked Strings
----------------------------------

The waveguide renderer runs every recirculated sample through this stage once
per period. High harmonics lose a little energy on every trip around the
loop, the fundamental barely any, so the tone darkens as it rings out. That
is the whole trick behind the Karplus-Strong timbre.

The same stage shapes the initial noise burst: a low `pluck_damping` blurs
the excitation (soft fingertip), a high one keeps it bright (hard pick).


Stability
---------

With a outside [0, 1] the (1 - a) term flips sign or exceeds one and the
recurrence diverges. Nothing here clamps it; callers own that range.
*/

/// Single step of the one-pole recurrence.
///
/// Pure function: the caller threads `last_output` between calls.
#[inline]
pub fn low_pass(last_output: f32, input: f32, smoothing: f32) -> f32 {
    smoothing * input + (1.0 - smoothing) * last_output
}

/// Stateful wrapper around [`low_pass`] that remembers its last output.
#[derive(Debug, Clone, Copy)]
pub struct OnePole {
    last_output: f32,
    pub smoothing: f32,
}

impl OnePole {
    pub fn new(smoothing: f32) -> Self {
        Self {
            last_output: 0.0,
            smoothing,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        self.last_output = low_pass(self.last_output, input, self.smoothing);
        self.last_output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    pub fn reset(&mut self) {
        self.last_output = 0.0;
    }
}
