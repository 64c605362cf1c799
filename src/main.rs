//! bucketmap - map local media files to their public object-storage URLs.

mod cli;
mod config;
mod logger;
mod manifest;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ManifestConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        // init runs before any config exists
        Commands::Init { dry, force } => cli::init::init_config(&cli.config, *dry, *force),
        Commands::Build { .. } => cli::build::build(&ManifestConfig::load(&cli)?),
        Commands::Resolve { args } => {
            cli::resolve::run_resolve(args, &ManifestConfig::load(&cli)?)
        }
    }
}
