//! PCM conversion and WAV export
//!
//! Output is always mono, 16-bit signed little-endian PCM in a RIFF/WAVE
//! container.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

/// Error writing a WAV container
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),
}

/// Convert samples (-1.0 to 1.0) to PCM i16
///
/// Samples are clamped first, so the magnitude never exceeds 32767.
/// NaN becomes silence.
pub fn to_pcm_i16(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            let clamped = if s.is_nan() { 0.0 } else { s.clamp(-1.0, 1.0) };
            (clamped * i16::MAX as f64).round() as i16
        })
        .collect()
}

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Encode PCM i16 samples as an in-memory WAV file
///
/// A zero sample rate is rejected before anything is written.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, ExportError> {
    if sample_rate == 0 {
        return Err(ExportError::InvalidSampleRate(sample_rate));
    }

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, wav_spec(sample_rate))?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Write PCM i16 samples to a WAV file
pub fn write_wav(samples: &[i16], sample_rate: u32, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_wav(samples, sample_rate)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
