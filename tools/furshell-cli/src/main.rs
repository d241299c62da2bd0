//! furshell - fur shell build tool
//!
//! Converts an OBJ mesh into shell stacks, fin quads, graftal points and
//! strand-density maps, driven by a furshell.toml manifest.

mod build;
mod manifest;
mod obj;

use anyhow::Result;
use clap::{Parser, Subcommand};
use furshell::StrandParams;
use furshell::params::{DEFAULT_DENSITY, DEFAULT_LAYERS, DEFAULT_MAP_SIZE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "furshell")]
#[command(about = "Fur shell build tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all enabled outputs from a manifest file
    Build {
        /// Path to furshell.toml manifest
        #[arg(default_value = "furshell.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest and input without building
    Check {
        /// Path to furshell.toml manifest
        #[arg(default_value = "furshell.toml")]
        manifest: PathBuf,
    },

    /// Generate fur and fin strand maps only
    Strands {
        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_MAP_SIZE)]
        width: u32,

        #[arg(long, default_value_t = DEFAULT_MAP_SIZE)]
        height: u32,

        /// Number of shell layers the fur map is graded over
        #[arg(long, default_value_t = DEFAULT_LAYERS)]
        layers: u32,

        /// Fraction of texels that receive a strand, 0 to 1
        #[arg(long, default_value_t = DEFAULT_DENSITY)]
        density: f32,

        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Build { verbose: true, .. });
    init_logging(verbose);

    match cli.command {
        Commands::Build {
            manifest, output, ..
        } => {
            tracing::debug!("Building from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let written = build::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} files written", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            obj::load_obj(&config.input)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Strands {
            output,
            width,
            height,
            layers,
            density,
            seed,
        } => {
            let params = StrandParams::new(width, height, layers, density);
            build::build_strands(&params, seed, &output)?;
            tracing::info!("Done!");
        }
    }

    Ok(())
}
