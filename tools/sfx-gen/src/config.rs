//! sfx-gen.toml configuration
//!
//! Every section and field is optional; a missing file means defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "sfx-gen.toml";

/// sfx-gen.toml structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub synth: SynthSection,
    #[serde(default)]
    pub transcode: TranscodeSettings,
}

/// Output layout section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Root directory; one subdirectory per effect category is created below it
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets/audio/sfx")
}

/// Synthesis section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthSection {
    /// Sample rate in Hz, must be non-zero.
    /// Default: 44100
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for SynthSection {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_sample_rate() -> u32 {
    sfx_synth::SAMPLE_RATE
}

/// External lossy encoder settings
///
/// The encoder is invoked as
/// `<program> -y -i <input.wav> -c:a <codec> -q:a <quality> <output.<extension>>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscodeSettings {
    /// Default: true
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Executable name or path, looked up on PATH.
    /// Default: ffmpeg
    #[serde(default = "default_program")]
    pub program: PathBuf,
    /// Default: libvorbis
    #[serde(default = "default_codec")]
    pub codec: String,
    /// Encoder quality/bitrate parameter.
    /// Default: 6
    #[serde(default = "default_quality")]
    pub quality: String,
    /// Extension of the compressed sibling file.
    /// Default: ogg
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Keep the WAV next to the compressed file.
    /// Default: false
    #[serde(default)]
    pub keep_pcm: bool,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_program(),
            codec: default_codec(),
            quality: default_quality(),
            extension: default_extension(),
            keep_pcm: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_program() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_codec() -> String {
    "libvorbis".to_string()
}

fn default_quality() -> String {
    "6".to_string()
}

fn default_extension() -> String {
    "ogg".to_string()
}

impl Config {
    /// Parse configuration from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).context("Failed to parse sfx-gen configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.synth.sample_rate == 0 {
            anyhow::bail!("synth.sample_rate must be greater than zero");
        }
        Ok(())
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load an explicitly requested file, or the default file if it exists
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just yields the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!("Using {}", DEFAULT_CONFIG_FILE);
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
