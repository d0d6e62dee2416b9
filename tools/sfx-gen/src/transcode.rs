//! External lossy encoder adapter
//!
//! Wraps a command-line encoder (ffmpeg by default). The encoder is a
//! black box: it gets a WAV path and must produce the compressed sibling
//! file. Failures leave the WAV untouched.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::config::TranscodeSettings;

/// Error running the external encoder
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("Encoder not found: {program} ({source})")]
    NotFound {
        program: String,
        source: which::Error,
    },

    #[error("Encoder I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoder exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("Encoder reported success but {0} was not created")]
    MissingOutput(PathBuf),
}

/// Resolved encoder ready to run
#[derive(Debug, Clone)]
pub struct Transcoder {
    executable: PathBuf,
    settings: TranscodeSettings,
}

impl Transcoder {
    /// Find the configured encoder on PATH
    pub fn locate(settings: &TranscodeSettings) -> Result<Self, TranscodeError> {
        let executable =
            which::which(&settings.program).map_err(|source| TranscodeError::NotFound {
                program: settings.program.display().to_string(),
                source,
            })?;
        tracing::debug!("Using encoder {}", executable.display());

        Ok(Self {
            executable,
            settings: settings.clone(),
        })
    }

    /// Path of the encoder executable
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Compressed sibling path for a WAV file
    pub fn output_path(&self, wav: &Path) -> PathBuf {
        wav.with_extension(&self.settings.extension)
    }

    /// Re-encode `wav` to its compressed sibling
    ///
    /// On success the compressed path is returned and the WAV is removed
    /// unless `keep_pcm` is set. Encoder output is captured and only
    /// surfaced through the error on failure. A compressed file left over
    /// from an earlier run is removed first, so it is never mistaken for
    /// fresh output.
    pub fn transcode(&self, wav: &Path) -> Result<PathBuf, TranscodeError> {
        let output_path = self.output_path(wav);
        match std::fs::remove_file(&output_path) {
            Ok(()) => tracing::debug!("Removed stale {}", output_path.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        let output = Command::new(&self.executable)
            .arg("-y")
            .arg("-i")
            .arg(wav)
            .args(["-c:a", self.settings.codec.as_str()])
            .args(["-q:a", self.settings.quality.as_str()])
            .arg(&output_path)
            .output()?;

        if !output.status.success() {
            return Err(TranscodeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !output_path.is_file() {
            return Err(TranscodeError::MissingOutput(output_path));
        }

        if !self.settings.keep_pcm {
            std::fs::remove_file(wav)?;
        }

        Ok(output_path)
    }
}
