//! Amplitude envelopes
//!
//! Multiplicative gain curves applied element-wise to a sample buffer.
//! Envelopes never change the buffer length.

use crate::sample_count;

/// Exponential decay envelope: `gain(t) = e^(−rate·t)`
///
/// The rate controls the perceived tail length; larger is shorter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpDecay {
    /// Decay rate constant (1/s)
    pub rate: f64,
}

impl ExpDecay {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Gain at time `t` seconds after the start of the buffer
    pub fn gain_at(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }

    /// Apply the decay to samples in place
    pub fn apply(&self, samples: &mut [f64], sample_rate: u32) {
        let rate = sample_rate as f64;
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample *= self.gain_at(i as f64 / rate);
        }
    }
}

/// Linear fade-in/fade-out for click suppression
///
/// The first `fade_in` seconds ramp from 0 to 1 and the last `fade_out`
/// seconds ramp from 1 to 0. Ramps include both end points, so the very
/// first sample is silenced completely.
///
/// A fade-out window that does not fit strictly inside the buffer is
/// skipped entirely. A fade-in window longer than the buffer keeps its
/// slope and is cut off at the buffer end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Fade-in time in seconds
    pub fade_in: f64,
    /// Fade-out time in seconds
    pub fade_out: f64,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            fade_in: 0.01,
            fade_out: 0.05,
        }
    }
}

impl Fade {
    pub fn new(fade_in: f64, fade_out: f64) -> Self {
        Self { fade_in, fade_out }
    }

    /// Apply the fades to samples in place
    pub fn apply(&self, samples: &mut [f64], sample_rate: u32) {
        let len = samples.len();
        let fade_in_samples = sample_count(self.fade_in, sample_rate);
        let fade_out_samples = sample_count(self.fade_out, sample_rate);

        if fade_in_samples > 0 {
            for (i, sample) in samples.iter_mut().take(fade_in_samples).enumerate() {
                *sample *= ramp(i, fade_in_samples);
            }
        }

        if fade_out_samples > 0 && fade_out_samples < len {
            let start = len - fade_out_samples;
            for (i, sample) in samples[start..].iter_mut().enumerate() {
                *sample *= 1.0 - ramp(i, fade_out_samples);
            }
        }
    }
}

/// Position `i` on an inclusive 0..=1 ramp of `n` points
fn ramp(i: usize, n: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}
