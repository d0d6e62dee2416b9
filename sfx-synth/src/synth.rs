//! Synthesizer context and effect composer
//!
//! [`Synth`] carries the sample rate into every synthesis call and renders
//! [`EffectRecipe`]s by layering tone builder output in time.

use tracing::debug;

use crate::oscillators;
use crate::recipes::{EffectRecipe, OutputLevel};
use crate::{sample_count, SAMPLE_RATE};

/// Sound effect synthesizer
///
/// # Example
/// ```
/// use sfx_synth::*;
///
/// let synth = Synth::new(SAMPLE_RATE);
///
/// // A single voice
/// let chime = synth.bell_tone(880.0, 0.2);
/// assert_eq!(chime.len(), 8820);
///
/// // A complete effect
/// let jump = synth.render(find_recipe("jump_small").unwrap());
/// assert_eq!(jump.len(), 6615);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synth {
    sample_rate: u32,
}

impl Default for Synth {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

impl Synth {
    /// Create a new synthesizer with the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Raw sine wave, see [`oscillators::sine`]
    pub fn sine(&self, frequency: f64, duration: f64, phase: f64) -> Vec<f64> {
        oscillators::sine(frequency, duration, phase, self.sample_rate)
    }

    /// Raw swept sine with accumulated phase, see [`oscillators::sweep`]
    pub fn sweep<F>(&self, duration: f64, freq_at: F) -> Vec<f64>
    where
        F: Fn(f64) -> f64,
    {
        oscillators::sweep(duration, self.sample_rate, freq_at)
    }

    /// Render a complete effect
    ///
    /// Allocates a silent buffer of the recipe's duration, mixes every
    /// layer in at its offset (anything past the end is dropped), then
    /// applies the recipe's output level. The result is clamped to
    /// -1.0..=1.0.
    pub fn render(&self, recipe: &EffectRecipe) -> Vec<f64> {
        let mut out = vec![0.0; sample_count(recipe.duration, self.sample_rate)];

        for layer in recipe.layers {
            let signal = self.voice(&layer.voice, layer.duration);
            let offset = sample_count(layer.offset, self.sample_rate);
            mix_into(&mut out, &signal, offset, layer.gain);
            debug!(
                effect = recipe.name,
                voice = ?layer.voice,
                offset,
                samples = signal.len(),
                "mixed layer"
            );
        }

        match recipe.level {
            OutputLevel::Peak(target) => normalize_to(&mut out, target),
            OutputLevel::Gain(factor) => out.iter_mut().for_each(|s| *s *= factor),
        }

        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        debug!(
            effect = recipe.name,
            samples = out.len(),
            peak = peak(&out),
            "rendered effect"
        );
        out
    }
}

/// Add `signal × gain` into `out`, starting at sample `offset`
///
/// Samples that would land past the end of `out` are dropped; the output
/// buffer never grows.
pub fn mix_into(out: &mut [f64], signal: &[f64], offset: usize, gain: f64) {
    if offset >= out.len() {
        return;
    }
    for (o, &s) in out[offset..].iter_mut().zip(signal) {
        *o += s * gain;
    }
}

/// Peak absolute amplitude of a buffer (0.0 when empty)
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |a, s| a.max(s.abs()))
}

/// Scale samples so the peak amplitude equals `target`
///
/// Silent buffers are left untouched.
pub fn normalize_to(samples: &mut [f64], target: f64) {
    let max_amplitude = peak(samples);
    if max_amplitude > 0.0 {
        let scale = target / max_amplitude;
        for sample in samples.iter_mut() {
            *sample *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::{Category, Layer};
    use crate::tones::Voice;

    #[test]
    fn test_synth_default_rate() {
        assert_eq!(Synth::default().sample_rate(), SAMPLE_RATE);
    }

    #[test]
    fn test_synth_primitives_use_rate() {
        let synth = Synth::new(22050);
        assert_eq!(synth.sine(440.0, 0.1, 0.0).len(), 2205);
        assert_eq!(synth.sweep(0.1, |t| 400.0 + 100.0 * t).len(), 2205);
    }

    #[test]
    fn test_mix_into_offset() {
        let mut out = vec![0.0; 5];
        mix_into(&mut out, &[1.0, 1.0], 2, 0.5);
        assert_eq!(out, vec![0.0, 0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_mix_into_truncates_overflow() {
        let mut out = vec![0.0; 4];
        mix_into(&mut out, &[1.0, 2.0, 3.0, 4.0], 2, 1.0);
        assert_eq!(out, vec![0.0, 0.0, 1.0, 2.0]);

        // Offset past the end is a no-op
        mix_into(&mut out, &[1.0], 10, 1.0);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_normalize_to() {
        let mut samples = vec![1.0, -0.5, 0.25];
        normalize_to(&mut samples, 0.8);
        assert!((samples[0] - 0.8).abs() < 1e-12);
        assert!((samples[1] + 0.4).abs() < 1e-12);
        assert!((samples[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_silent() {
        let mut samples = vec![0.0; 16];
        normalize_to(&mut samples, 0.5);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_peak() {
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(peak(&[0.1, -0.7, 0.3]), 0.7);
    }

    #[test]
    fn test_render_silent_recipe() {
        let recipe = EffectRecipe {
            name: "silence",
            category: Category::Ui,
            description: "Nothing at all",
            duration: 0.1,
            layers: &[],
            level: OutputLevel::Peak(0.5),
        };
        let samples = Synth::default().render(&recipe);
        assert_eq!(samples.len(), 4410);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_render_layer_past_end() {
        const LAYERS: &[Layer] = &[Layer {
            voice: Voice::Soft {
                frequency: 440.0,
                decay: 15.0,
            },
            duration: 0.1,
            offset: 0.5,
            gain: 1.0,
        }];
        let recipe = EffectRecipe {
            name: "late",
            category: Category::Ui,
            description: "Layer starts after the effect ends",
            duration: 0.1,
            layers: LAYERS,
            level: OutputLevel::Peak(0.5),
        };
        let samples = Synth::default().render(&recipe);
        assert_eq!(samples.len(), 4410);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_render_gain_is_clamped() {
        const LAYERS: &[Layer] = &[Layer {
            voice: Voice::Soft {
                frequency: 440.0,
                decay: 1.0,
            },
            duration: 0.1,
            offset: 0.0,
            gain: 1.0,
        }];
        let recipe = EffectRecipe {
            name: "loud",
            category: Category::Ui,
            description: "Gain far above full scale",
            duration: 0.1,
            layers: LAYERS,
            level: OutputLevel::Gain(10.0),
        };
        let samples = Synth::default().render(&recipe);
        assert!(samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));
        assert_eq!(peak(&samples), 1.0);
    }
}
