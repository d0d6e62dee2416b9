//! Batch generation
//!
//! Renders each recipe, writes `<root>/<category>/<name>.wav` and, if an
//! encoder is available, re-encodes it. A failed encode only downgrades
//! that one effect to an uncompressed delivery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use sfx_synth::{to_pcm_i16, write_wav, EffectRecipe, Synth};

use crate::transcode::Transcoder;

/// Where an effect ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Compressed file produced by the encoder
    Compressed(PathBuf),
    /// WAV only (encoder disabled, missing or failed)
    Uncompressed(PathBuf),
}

impl Delivery {
    pub fn path(&self) -> &Path {
        match self {
            Delivery::Compressed(path) | Delivery::Uncompressed(path) => path,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, Delivery::Compressed(_))
    }
}

/// Result of delivering one effect
#[derive(Debug, Clone)]
pub struct Report {
    pub name: &'static str,
    pub samples: usize,
    pub delivery: Delivery,
}

/// Create the category directories needed by `recipes`
///
/// Failing to create any of them aborts the run.
pub fn prepare_output(root: &Path, recipes: &[EffectRecipe]) -> Result<()> {
    for recipe in recipes {
        let dir = root.join(recipe.category.dir_name());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Render one effect and write it below `root`
pub fn deliver(
    synth: &Synth,
    recipe: &EffectRecipe,
    root: &Path,
    transcoder: Option<&Transcoder>,
) -> Result<Report> {
    let samples = synth.render(recipe);
    let pcm = to_pcm_i16(&samples);

    let wav_path = root.join(format!("{}.wav", recipe.file_stem()));
    write_wav(&pcm, synth.sample_rate(), &wav_path)
        .with_context(|| format!("Failed to write WAV file: {}", wav_path.display()))?;

    let delivery = match transcoder {
        Some(transcoder) => match transcoder.transcode(&wav_path) {
            Ok(compressed) => Delivery::Compressed(compressed),
            Err(err) => {
                tracing::warn!("{}: delivered uncompressed ({})", recipe.file_stem(), err);
                Delivery::Uncompressed(wav_path)
            }
        },
        None => Delivery::Uncompressed(wav_path),
    };

    Ok(Report {
        name: recipe.name,
        samples: pcm.len(),
        delivery,
    })
}

/// Generate every recipe in order
pub fn generate(
    synth: &Synth,
    recipes: &[EffectRecipe],
    root: &Path,
    transcoder: Option<&Transcoder>,
) -> Result<Vec<Report>> {
    prepare_output(root, recipes)?;

    let mut reports = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        tracing::info!("  {}...", recipe.file_stem());
        let report = deliver(synth, recipe, root, transcoder)?;
        tracing::info!(
            "    -> {} ({} samples, {:.2}s)",
            report.delivery.path().display(),
            report.samples,
            report.samples as f64 / synth.sample_rate() as f64
        );
        reports.push(report);
    }

    Ok(reports)
}
