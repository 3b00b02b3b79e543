//! Builder pattern for ZenNode

use crate::config::{HttpEvaluatorConfig, NodeConfig};
use crate::error::{NodeError, Result};
use crate::evaluator::{EvaluatorProvider, HttpEvaluatorProvider};
use crate::node::ZenNode;
use std::sync::Arc;
use std::time::Duration;

/// Builder for ZenNode
///
/// # Example
///
/// ```rust,ignore
/// use zen_node::{HttpEvaluatorConfig, ZenNodeBuilder};
///
/// let node = ZenNodeBuilder::new()
///     .with_http_evaluator(HttpEvaluatorConfig::new("http://localhost:3000/api/simulate"))
///     .continue_on_fail(true)
///     .build()?;
/// ```
pub struct ZenNodeBuilder {
    config: NodeConfig,
    provider: Option<Arc<dyn EvaluatorProvider>>,
    http_config: Option<HttpEvaluatorConfig>,
}

impl ZenNodeBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: NodeConfig::new(),
            provider: None,
            http_config: None,
        }
    }

    /// Evaluate through a custom provider
    pub fn with_provider(mut self, provider: Arc<dyn EvaluatorProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Evaluate against a remote engine endpoint
    pub fn with_http_evaluator(mut self, config: HttpEvaluatorConfig) -> Self {
        self.http_config = Some(config);
        self
    }

    /// Replace the whole node configuration
    pub fn with_config(mut self, config: NodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Record failures as error items instead of aborting
    pub fn continue_on_fail(mut self, enable: bool) -> Self {
        self.config.continue_on_fail = enable;
        self
    }

    /// Bound each evaluation by `timeout`
    pub fn evaluation_timeout(mut self, timeout: Duration) -> Self {
        self.config.evaluation_timeout = Some(timeout);
        self
    }

    /// Build the node
    ///
    /// A provider set with `with_provider()` takes precedence over an HTTP
    /// evaluator configuration.
    pub fn build(self) -> Result<ZenNode> {
        let provider: Arc<dyn EvaluatorProvider> = match (self.provider, self.http_config) {
            (Some(provider), _) => provider,
            (None, Some(http)) => {
                tracing::info!(endpoint = %http.endpoint, "Using HTTP decision evaluator");
                let provider = HttpEvaluatorProvider::new(http)
                    .map_err(|e| NodeError::ConfigError(e.to_string()))?;
                Arc::new(provider)
            }
            (None, None) => {
                return Err(NodeError::ConfigError(
                    "No decision evaluator configured".to_string(),
                ))
            }
        };

        Ok(ZenNode::new(provider, self.config))
    }
}

impl Default for ZenNodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
