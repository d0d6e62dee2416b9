//! sfx-gen - procedural sound effect generator
//!
//! Renders the built-in game sound effects to WAV files grouped by
//! category, then re-encodes them with an external encoder when one is
//! available.
//!
//! # Usage
//!
//! ```bash
//! # Generate every effect into assets/audio/sfx/<category>/<name>.{wav,ogg}
//! sfx-gen generate
//!
//! # Only a few effects, WAV only
//! sfx-gen generate --only jump_small --only hurt --no-transcode
//!
//! # List the available effects
//! sfx-gen list
//!
//! # Render a single effect to a file
//! sfx-gen render flower -o flower.wav
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sfx_gen::{Config, Transcoder};
use sfx_synth::{find_recipe, to_pcm_i16, write_wav, EffectRecipe, Synth, RECIPES};

#[derive(Parser)]
#[command(name = "sfx-gen")]
#[command(about = "Procedural game sound effect generator")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./sfx-gen.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate effects into the output directory
    Generate {
        /// Output root directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only generate the named effects (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Skip the external encoder, deliver WAV only
        #[arg(long)]
        no_transcode: bool,

        /// Keep WAV files after a successful encode
        #[arg(long)]
        keep_wav: bool,
    },

    /// List available effects
    List,

    /// Render a single effect to a WAV file
    Render {
        /// Effect name (see `list`)
        name: String,

        /// Output .wav file (defaults to <name>.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let config = Config::resolve(cli.config.as_deref())?;
    let synth = Synth::new(config.synth.sample_rate);

    match cli.command {
        Commands::Generate {
            output,
            only,
            no_transcode,
            keep_wav,
        } => {
            let root = output.unwrap_or(config.output.dir);
            let recipes = select_recipes(&only)?;

            let mut settings = config.transcode;
            settings.keep_pcm |= keep_wav;
            let transcoder = if no_transcode || !settings.enabled {
                None
            } else {
                match Transcoder::locate(&settings) {
                    Ok(transcoder) => {
                        tracing::info!("Encoder: {}", transcoder.executable().display());
                        Some(transcoder)
                    }
                    Err(err) => {
                        tracing::warn!("{}; effects will be delivered as WAV", err);
                        None
                    }
                }
            };

            tracing::info!("Generating {} sound effects", recipes.len());
            tracing::info!("Output -> {}", root.display());

            let reports = sfx_gen::generate(&synth, &recipes, &root, transcoder.as_ref())?;

            let compressed = reports.iter().filter(|r| r.delivery.is_compressed()).count();
            tracing::info!(
                "Done! {} effects ({} compressed, {} WAV only)",
                reports.len(),
                compressed,
                reports.len() - compressed
            );
        }

        Commands::List => {
            for recipe in RECIPES {
                println!(
                    "{:<14} {:<13} {:.2}s  {}",
                    recipe.name,
                    recipe.category.dir_name(),
                    recipe.duration,
                    recipe.description
                );
            }
        }

        Commands::Render { name, output } => {
            let recipe = find_recipe(&name)
                .with_context(|| format!("Unknown effect: {} (see `sfx-gen list`)", name))?;
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.wav", recipe.name)));

            tracing::info!("Rendering {} -> {:?}", recipe.name, output);
            let pcm = to_pcm_i16(&synth.render(recipe));
            write_wav(&pcm, synth.sample_rate(), &output)
                .with_context(|| format!("Failed to write WAV file: {}", output.display()))?;
            tracing::info!("Done! {} samples", pcm.len());
        }
    }

    Ok(())
}

/// Resolve `--only` names, keeping table order; empty means all effects
fn select_recipes(only: &[String]) -> Result<Vec<EffectRecipe>> {
    if only.is_empty() {
        return Ok(RECIPES.to_vec());
    }

    for name in only {
        if find_recipe(name).is_none() {
            anyhow::bail!("Unknown effect: {} (see `sfx-gen list`)", name);
        }
    }

    Ok(RECIPES
        .iter()
        .filter(|recipe| only.iter().any(|name| name == recipe.name))
        .copied()
        .collect())
}
