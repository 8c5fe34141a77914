//! # genre-harvester CLI entry point
//!
//! Authenticates with the catalog, runs every discovery strategy and writes
//! the sorted genre list. Runs with no arguments; credentials come from
//! `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use genre_harvester::harvest::harvest;
use genre_harvester::persist::{DEFAULT_MIRROR_DIR, DEFAULT_OUTPUT_FILE};
use genre_harvester::{save_genres, HarvestConfig, OutputTargets};

const SAMPLE_SIZE: usize = 20;

/// Harvest the catalog's genre taxonomy into a JSON file.
#[derive(Parser, Debug)]
#[command(name = "genre-harvester", version, about, long_about = None)]
struct Cli {
    /// File that receives the genre list.
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Directory that also receives a copy, if it exists.
    #[arg(long, default_value = DEFAULT_MIRROR_DIR)]
    mirror_dir: PathBuf,

    /// Deepest related-artist level to explore (seeds are depth 0).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Related artists followed per explored artist.
    #[arg(long)]
    fan_out: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::info!("Starting genre harvester");

    let mut config = match HarvestConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };
    if let Some(depth) = cli.max_depth {
        config.settings = config.settings.with_max_depth(depth);
    }
    if let Some(fan_out) = cli.fan_out {
        config.settings = config.settings.with_fan_out(fan_out);
    }

    let genres = match harvest(&config).await {
        Ok(result) => result.genres,
        Err(e) => {
            tracing::error!(error = %e, "Failed to retrieve genres");
            return ExitCode::from(1);
        }
    };

    if genres.is_empty() {
        tracing::warn!("Harvest finished but found no genres; nothing written");
        return ExitCode::SUCCESS;
    }

    let targets = OutputTargets::new(cli.output).with_mirror_dir(cli.mirror_dir);
    if let Err(e) = save_genres(&genres, &targets) {
        tracing::error!(error = %e, "Failed to save genres");
        return ExitCode::from(1);
    }

    println!("\nSample of genres:");
    for genre in genres.iter().take(SAMPLE_SIZE) {
        println!("- {genre}");
    }
    if genres.len() > SAMPLE_SIZE {
        println!("... and {} more", genres.len() - SAMPLE_SIZE);
    }

    ExitCode::SUCCESS
}
