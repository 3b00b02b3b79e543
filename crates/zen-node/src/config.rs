//! Configuration types for ZenNode

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-execution node configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Record failed items as `{ "error": message }` instead of aborting the batch
    #[serde(default)]
    pub continue_on_fail: bool,

    /// Upper bound for a single evaluation; `None` waits indefinitely
    #[serde(
        default,
        rename = "evaluation_timeout_ms",
        with = "duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation_timeout: Option<Duration>,
}

impl NodeConfig {
    /// Create a new node configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the continue-on-fail flag
    pub fn continue_on_fail(mut self, enable: bool) -> Self {
        self.continue_on_fail = enable;
        self
    }

    /// Set the evaluation timeout
    pub fn with_evaluation_timeout(mut self, timeout: Duration) -> Self {
        self.evaluation_timeout = Some(timeout);
        self
    }
}

/// HTTP evaluator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpEvaluatorConfig {
    /// Decision simulation endpoint, e.g. `http://localhost:3000/api/simulate`
    pub endpoint: String,

    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl HttpEvaluatorConfig {
    /// Create a configuration for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout_secs: default_http_timeout_secs(),
        }
    }

    /// Set the bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
