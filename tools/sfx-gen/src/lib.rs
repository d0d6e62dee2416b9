//! sfx-gen library
//!
//! Batch driver around `sfx-synth`: loads configuration, lays out the
//! category folders, writes one WAV per effect and optionally hands each
//! file to an external lossy encoder.

pub mod config;
pub mod generate;
pub mod transcode;

pub use config::{Config, OutputSection, SynthSection, TranscodeSettings};
pub use generate::{deliver, generate, prepare_output, Delivery, Report};
pub use transcode::{TranscodeError, Transcoder};
