use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod index;
mod parser;
mod render;
mod vault;

use config::Config;

#[derive(Parser)]
#[command(name = "rtg")]
#[command(author, version, about = "rtg - Publish wiki-style notes as cross-linked markdown")]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a directory of notes, adding backlinks and unlinked references
    Format {
        /// Directory of raw notes
        source: Option<PathBuf>,

        /// Directory to write formatted notes to
        destination: Option<PathBuf>,
    },

    /// Show the notes linking to a note
    Backlinks {
        /// Note name (with or without .md)
        note: String,

        /// Directory of raw notes
        #[arg(long, short = 's')]
        source: Option<PathBuf>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show plain-text mentions of a note that are not linked
    Unlinked {
        /// Note name (with or without .md)
        note: String,

        /// Directory of raw notes
        #[arg(long, short = 's')]
        source: Option<PathBuf>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show statistics about a directory of notes
    Stats {
        /// Directory of raw notes
        source: Option<PathBuf>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Format { source, destination } => cli::commands::format(&config, source, destination),
        Commands::Backlinks { note, source, json } => cli::commands::backlinks(&config, source, &note, json),
        Commands::Unlinked { note, source, json } => cli::commands::unlinked(&config, source, &note, json),
        Commands::Stats { source } => cli::commands::stats(&config, source),
        Commands::Config { action: ConfigAction::Init } => cli::commands::config_init(),
    }
}
