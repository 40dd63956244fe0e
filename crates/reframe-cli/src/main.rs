//! Command-line frontend for the reframe pipeline.
//!
//! Reads a TOML configuration, builds the operation chain for the chosen
//! media kind and runs it over a single image or a directory of frames.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod media;
mod run;

#[derive(Parser)]
#[command(name = "reframe")]
#[command(about = "Config-driven image and frame-sequence transformations")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a single image using [image_settings]
    Image {
        /// Input image (JPEG or PNG)
        input: PathBuf,

        /// Output path; defaults to a timestamped name next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Transform every frame in a directory using [video_settings]
    Clip {
        /// Directory holding the frame sequence
        dir: PathBuf,

        /// Output directory; defaults to a timestamped name next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads; 0 uses the available parallelism
        #[arg(short, long, default_value = "0")]
        jobs: usize,
    },
    /// Validate the configuration and print the resolved operation chains
    Check,
    /// Write a commented starter configuration
    Init,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reframe=info".parse()?)
                .add_directive("reframe_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Image { input, output } => run::image(&cli.config, &input, output.as_deref()),
        Commands::Clip { dir, output, jobs } => {
            run::clip(&cli.config, &dir, output.as_deref(), jobs)
        }
        Commands::Check => run::check(&cli.config),
        Commands::Init => run::init(&cli.config),
    }
}
