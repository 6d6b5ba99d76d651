//! Indicator Map - command line entry point

use anyhow::{Context, Result};
use clap::Parser;
use indicator_map::cli::Cli;
use indicator_map::config::MapConfig;
use indicator_map::pipeline;
use log::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut config = match &cli.config {
        Some(path) => MapConfig::from_file(path)?,
        None => MapConfig::default(),
    };
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    let summary = pipeline::run(&config).context("Map generation failed")?;
    info!(
        "{} markers across {} layers",
        summary.total_markers(),
        summary.layers.len()
    );

    if cli.open {
        if let Err(e) = open::that(&summary.output) {
            warn!("Could not open {}: {}", summary.output.display(), e);
        }
    }
    Ok(())
}
