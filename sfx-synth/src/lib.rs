//! Procedural sound effect synthesis
//!
//! Builds short game sound effects from plain waveforms, with no sampled
//! assets. The pipeline runs leaf-first:
//! oscillators -> envelopes -> tone builders ([`Voice`]) -> effect recipes
//! ([`EffectRecipe`]) -> 16-bit PCM export.
//!
//! # Example
//! ```
//! use sfx_synth::*;
//!
//! let synth = Synth::new(SAMPLE_RATE);
//!
//! // Render one of the built-in effects
//! let recipe = find_recipe("flower").unwrap();
//! let samples = synth.render(recipe);
//! assert_eq!(samples.len(), 8820);
//!
//! // Quantize and encode as an in-memory WAV file
//! let pcm = to_pcm_i16(&samples);
//! let wav = encode_wav(&pcm, SAMPLE_RATE).unwrap();
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```

mod envelope;
mod export;
mod oscillators;
mod recipes;
mod synth;
mod tones;

/// Default sample rate (44.1kHz, mono)
pub const SAMPLE_RATE: u32 = 44_100;

// Envelopes
pub use envelope::{ExpDecay, Fade};

// Oscillators
pub use oscillators::{sine, sweep, SweepCurve};

// Tone builders
pub use tones::{BellRatio, Partial, Voice, BELL_DECAY, BELL_RATIOS};

// Recipes and composition
pub use recipes::{find_recipe, Category, EffectRecipe, Layer, OutputLevel, RECIPES};
pub use synth::{mix_into, normalize_to, peak};

// Synth context
pub use synth::Synth;

// Export
pub use export::{encode_wav, to_pcm_i16, write_wav, ExportError};

/// Number of samples covering `duration` seconds at `sample_rate`
///
/// Rounds to the nearest whole sample so that buffer lengths, fade windows
/// and layer offsets computed from the same duration always agree.
/// Negative or non-finite durations yield zero samples.
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    let samples = (duration * sample_rate as f64).round();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_recipe_durations() {
        assert_eq!(sample_count(0.15, SAMPLE_RATE), 6615);
        assert_eq!(sample_count(0.2, SAMPLE_RATE), 8820);
        assert_eq!(sample_count(0.08, SAMPLE_RATE), 3528);
        assert_eq!(sample_count(0.03, SAMPLE_RATE), 1323);
    }

    #[test]
    fn test_sample_count_degenerate() {
        assert_eq!(sample_count(0.0, SAMPLE_RATE), 0);
        assert_eq!(sample_count(-1.0, SAMPLE_RATE), 0);
        assert_eq!(sample_count(f64::NAN, SAMPLE_RATE), 0);
    }
}
