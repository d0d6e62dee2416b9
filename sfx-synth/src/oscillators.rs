//! Waveform primitives
//!
//! Sine and swept-sine generators. All samples are in the -1.0 to 1.0 range
//! and cover `[0, duration)`; the sample at exactly `duration` is never
//! produced, so consecutive segments can be concatenated without doubling
//! a sample.

use std::f64::consts::TAU;

use crate::sample_count;

/// Generate a sine wave
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `duration` - Duration in seconds
/// * `phase` - Phase offset in radians
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// `sin(2π·frequency·t + phase)` for `t = i / sample_rate`
pub fn sine(frequency: f64, duration: f64, phase: f64, sample_rate: u32) -> Vec<f64> {
    let num_samples = sample_count(duration, sample_rate);
    let rate = sample_rate as f64;

    (0..num_samples)
        .map(|i| {
            let t = i as f64 / rate;
            (TAU * frequency * t + phase).sin()
        })
        .collect()
}

/// Generate a sine wave whose frequency changes over time
///
/// The phase is the running sum of `2π·f(t)/sample_rate`, including the
/// current sample. Integrating the instantaneous frequency keeps the phase
/// continuous; evaluating `sin(2π·f(t)·t)` directly would not.
///
/// # Arguments
/// * `duration` - Duration in seconds
/// * `sample_rate` - Sample rate in Hz
/// * `freq_at` - Instantaneous frequency in Hz at time `t` seconds
pub fn sweep<F>(duration: f64, sample_rate: u32, freq_at: F) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let num_samples = sample_count(duration, sample_rate);
    let rate = sample_rate as f64;
    let mut samples = Vec::with_capacity(num_samples);

    let mut phase = 0.0f64;
    for i in 0..num_samples {
        let t = i as f64 / rate;
        phase += TAU * freq_at(t) / rate;
        samples.push(phase.sin());
    }

    samples
}

/// Instantaneous frequency curve for a swept tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepCurve {
    /// Straight line from `start` Hz at t=0 to `end` Hz at t=`duration`
    Linear { start: f64, end: f64, duration: f64 },
    /// Decaying glide: `base + depth·e^(−rate·t)`
    Glide { base: f64, depth: f64, rate: f64 },
}

impl SweepCurve {
    /// Frequency in Hz at time `t` seconds
    pub fn frequency_at(&self, t: f64) -> f64 {
        match *self {
            SweepCurve::Linear {
                start,
                end,
                duration,
            } => {
                if duration > 0.0 {
                    start + (end - start) * (t / duration)
                } else {
                    start
                }
            }
            SweepCurve::Glide { base, depth, rate } => base + depth * (-rate * t).exp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_RATE;

    #[test]
    fn test_sine_length_excludes_endpoint() {
        let samples = sine(440.0, 0.1, 0.0, SAMPLE_RATE);
        assert_eq!(samples.len(), 4410);
        // First sample sits at t = 0
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn test_sine_range() {
        let samples = sine(1000.0, 0.05, 0.3, SAMPLE_RATE);
        assert!(samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_sine_phase_offset() {
        let samples = sine(440.0, 0.01, std::f64::consts::FRAC_PI_2, SAMPLE_RATE);
        assert!((samples[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sine_zero_duration() {
        assert!(sine(440.0, 0.0, 0.0, SAMPLE_RATE).is_empty());
    }

    #[test]
    fn test_sweep_constant_matches_accumulated_sine() {
        // A constant-frequency sweep is a sine advanced by one sample
        let swept = sweep(0.01, SAMPLE_RATE, |_| 440.0);
        let step = TAU * 440.0 / SAMPLE_RATE as f64;
        let shifted = sine(440.0, 0.01, step, SAMPLE_RATE);

        assert_eq!(swept.len(), shifted.len());
        for (a, b) in swept.iter().zip(shifted.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sweep_phase_is_continuous() {
        // A large linear drop must not produce sample-to-sample jumps bigger
        // than the highest frequency allows.
        let curve = SweepCurve::Linear {
            start: 2000.0,
            end: 100.0,
            duration: 0.25,
        };
        let samples = sweep(0.25, SAMPLE_RATE, |t| curve.frequency_at(t));
        let max_step = TAU * 2000.0 / SAMPLE_RATE as f64;

        for pair in samples.windows(2) {
            assert!((pair[1] - pair[0]).abs() <= max_step + 1e-9);
        }
    }

    #[test]
    fn test_sweep_curve_linear() {
        let curve = SweepCurve::Linear {
            start: 659.0,
            end: 523.0,
            duration: 0.25,
        };
        assert_eq!(curve.frequency_at(0.0), 659.0);
        assert!((curve.frequency_at(0.25) - 523.0).abs() < 1e-9);
        assert!((curve.frequency_at(0.125) - 591.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_curve_glide() {
        let curve = SweepCurve::Glide {
            base: 400.0,
            depth: 1200.0,
            rate: 20.0,
        };
        assert_eq!(curve.frequency_at(0.0), 1600.0);
        // Settles towards the base frequency
        assert!((curve.frequency_at(10.0) - 400.0).abs() < 1e-6);
    }
}
