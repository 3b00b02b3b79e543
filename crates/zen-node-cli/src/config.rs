//! CLI configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use zen_node::{HttpEvaluatorConfig, NodeConfig};

/// Settings for running the node from the command line.
///
/// Sources, lowest precedence first: `config/zen-node.*` (or the file given
/// with `--config`), `ZEN_NODE_*` environment variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Decision simulation endpoint
    pub endpoint: String,

    /// Optional bearer token for the endpoint
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,

    /// Record failed items instead of aborting the batch
    pub continue_on_fail: bool,

    /// Per-item evaluation timeout in milliseconds
    pub evaluation_timeout_ms: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000/api/simulate".to_string(),
            api_key: None,
            http_timeout_secs: 30,
            continue_on_fail: false,
            evaluation_timeout_ms: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(file, None)
    }

    /// Load configuration, reading environment variables from `env` when given
    /// instead of the process environment
    pub fn load_from(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> anyhow::Result<Self> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config/zen-node").required(false),
        };

        let cfg = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("ZEN_NODE")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        cfg.try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// Evaluator settings
    pub fn evaluator(&self) -> HttpEvaluatorConfig {
        let config = HttpEvaluatorConfig::new(self.endpoint.clone())
            .with_timeout_secs(self.http_timeout_secs);
        match &self.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    /// Node settings
    pub fn node(&self) -> NodeConfig {
        let config = NodeConfig::new().continue_on_fail(self.continue_on_fail);
        match self.evaluation_timeout_ms {
            Some(ms) => config.with_evaluation_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}
