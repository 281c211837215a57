//! Linear tail fade.

/*
Tail Fade
=========

A rendered string is cut to a fixed length, but it is still ringing when the
buffer runs out. Stopping a non-zero waveform dead produces a click. The fix
is a short linear ramp over the end of the buffer:

  gain
   1.0 ────────────────────────╲
                                ╲
                                 ╲
   0.0 ───────────────────────────╲→ samples
       |<──── untouched ────>|<tail>|

    tail_samples = floor(len * proportion)
    gain(k)      = 1 - k / tail_samples     k = 0 .. tail_samples-1

The first tail sample keeps full gain and the last one lands one step above
zero. When the buffer is too short for a single tail sample the fade is
skipped entirely.
*/

/// Default share of the buffer covered by the fade.
pub const DEFAULT_TAIL_PROPORTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailFader {
    proportion: f64,
}

impl TailFader {
    /// `proportion` is clamped to [0, 1].
    pub fn new(proportion: f64) -> Self {
        Self {
            proportion: proportion.clamp(0.0, 1.0),
        }
    }

    pub fn proportion(&self) -> f64 {
        self.proportion
    }

    pub fn tail_samples(&self, len: usize) -> usize {
        (len as f64 * self.proportion).floor() as usize
    }

    pub fn apply(&self, buffer: &mut [f32]) {
        let tail_samples = self.tail_samples(buffer.len());
        if tail_samples == 0 {
            return;
        }

        let tail_start = buffer.len() - tail_samples;
        for (k, sample) in buffer[tail_start..].iter_mut().enumerate() {
            let gain = 1.0 - k as f64 / tail_samples as f64;
            *sample *= gain as f32;
        }
    }
}

impl Default for TailFader {
    fn default() -> Self {
        Self::new(DEFAULT_TAIL_PROPORTION)
    }
}

/// Fade the last 10% of `buffer` in place.
pub fn fade_tail(buffer: &mut [f32]) {
    TailFader::default().apply(buffer);
}
