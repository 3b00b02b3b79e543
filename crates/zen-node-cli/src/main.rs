//! Zen Engine node command-line host
//!
//! Runs the decision node over a batch of items against a remote engine.

mod cli;
mod config;
mod input;

use crate::cli::{Cli, Commands, RunArgs};
use crate::config::CliConfig;
use crate::input::CliParameters;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zen_node::{zen_engine_description, ZenNodeBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Describe => {
            let description = serde_json::to_string_pretty(&zen_engine_description())?;
            println!("{}", description);
        }
        Commands::Run(args) => {
            let mut config = CliConfig::load(cli.config.as_deref())?;
            apply_overrides(&mut config, &args);
            run(&config, &args).await?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber; logs go to stderr so stdout stays JSON
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zen_node=info,zen_node_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Command-line flags win over file and environment settings
fn apply_overrides(config: &mut CliConfig, args: &RunArgs) {
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    if args.continue_on_fail {
        config.continue_on_fail = true;
    }
    if let Some(ms) = args.timeout_ms {
        config.evaluation_timeout_ms = Some(ms);
    }
}

async fn run(config: &CliConfig, args: &RunArgs) -> Result<()> {
    let items = input::read_items(args.items.as_deref())?;
    let parameters = CliParameters::new(
        args.rules.as_deref(),
        args.input.as_deref(),
        args.rules_field.as_deref(),
        args.input_field.as_deref(),
    )?;

    let node = ZenNodeBuilder::new()
        .with_http_evaluator(config.evaluator())
        .with_config(config.node())
        .build()?;

    info!(
        items = items.len(),
        endpoint = %config.endpoint,
        continue_on_fail = config.continue_on_fail,
        "Running decision node"
    );

    let output = node
        .execute(&items, &parameters)
        .await
        .context("Decision node aborted")?;

    let text = serde_json::to_string_pretty(&output)?;
    match &args.output {
        Some(path) => tokio::fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write output to {}", path.display()))?,
        None => println!("{}", text),
    }

    Ok(())
}
