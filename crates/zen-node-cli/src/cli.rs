//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Run JDM decision graphs over batches of workflow items
#[derive(Parser)]
#[command(name = "zen-node")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (default: config/zen-node.*)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the node description as JSON
    Describe,

    /// Evaluate a batch of items
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Items file (JSON array); `-` reads stdin. Without it a single empty item runs
    #[arg(long)]
    pub items: Option<PathBuf>,

    /// Rules document (JSON text, or @file)
    #[arg(long)]
    pub rules: Option<String>,

    /// Input document (JSON text, or @file)
    #[arg(long)]
    pub input: Option<String>,

    /// Read the rules document from this field of each item
    #[arg(long)]
    pub rules_field: Option<String>,

    /// Read the input document from this field of each item
    #[arg(long)]
    pub input_field: Option<String>,

    /// Record failed items as `{ "error": ... }` instead of aborting
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Per-item evaluation timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Decision simulation endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Bearer token for the endpoint
    #[arg(long)]
    pub api_key: Option<String>,

    /// Write output items here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
