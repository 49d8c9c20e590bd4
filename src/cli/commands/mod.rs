//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod annotate;
mod batch;
mod config_cmd;
mod element;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nsrtag::config::{expand_path, Config};
use nsrtag::models::ElementRange;

#[derive(Parser)]
#[command(name = "nsrtag")]
#[command(about = "Annotate NSR keyword strings with nuclides, reactions, and atomic numbers")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "NSRTAG_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a single keyword string
    Annotate {
        /// Keyword text (reads stdin if omitted)
        text: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Ignore bare mass-number forms such as 16O
        #[arg(long)]
        no_bare: bool,
    },

    /// Annotate JSON Lines records ({"id": ..., "keywords": ...} per line)
    Batch {
        /// Input file (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only write records with an atomic number in this range
        /// (light, medium, heavy, actinides, superheavy, or LOW-HIGH)
        #[arg(short, long)]
        range: Option<ElementRange>,
        /// Records annotated concurrently (overrides config)
        #[arg(long)]
        concurrency: Option<usize>,
        /// Records per chunk (overrides config)
        #[arg(long)]
        batch_size: Option<usize>,
        /// Print distinct nuclide and reaction counts when done
        #[arg(long)]
        summary: bool,
        /// Number of entries shown per summary list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Look up an element by symbol or atomic number
    Element {
        /// Symbol (e.g. Pb) or atomic number (e.g. 82)
        query: String,
    },

    /// List the named element ranges
    Ranges,

    /// Show the effective configuration
    Config,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(&expand_path(&path))
            .await
            .map_err(|e| anyhow::anyhow!(e))?,
        None => Config::load().await,
    };

    match cli.command {
        Commands::Annotate {
            text,
            pretty,
            no_bare,
        } => annotate::cmd_annotate(&config, text, pretty, no_bare).await,
        Commands::Batch {
            input,
            output,
            range,
            concurrency,
            batch_size,
            summary,
            top,
        } => {
            let options = batch::BatchOptions {
                input,
                output,
                range,
                concurrency,
                batch_size,
                summary,
                top,
            };
            batch::cmd_batch(&config, options).await
        }
        Commands::Element { query } => element::cmd_element(&query),
        Commands::Ranges => element::cmd_ranges(),
        Commands::Config => config_cmd::cmd_config_show(&config),
    }
}
