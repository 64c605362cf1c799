//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ReportLevel;

/// Map local media files to their public object-storage URLs
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: bucketmap.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "bucketmap.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default bucketmap.toml in the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the config template to stdout instead of writing it
        #[arg(long)]
        dry: bool,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Scan the media tree and write the manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Show which bucket and URL the given files map to
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Directory to scan (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub scan: Option<PathBuf>,

    /// Manifest output path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// How to report files matching no bucket rule
    #[arg(long, value_enum)]
    pub unmatched: Option<ReportLevel>,

    /// How to report files outside their bucket root
    #[arg(long, value_enum)]
    pub misrooted: Option<ReportLevel>,
}

/// Resolve command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Files to resolve (relative to current directory)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
