//! HTTP-backed decision evaluator
//!
//! Evaluates decision graphs on a remote engine through its simulation
//! endpoint. Each request carries the whole graph and the input:
//!
//! ```json
//! { "content": { "nodes": [...], "edges": [...] }, "context": { ... } }
//! ```
//!
//! and the engine answers with
//!
//! ```json
//! { "result": { ... }, "performance": "1.2ms", "trace": { ... } }
//! ```
//!
//! If an API key is configured it is sent as a bearer token.

use super::{Decision, DecisionEvaluator, EvaluationResponse, EvaluatorProvider};
use crate::config::HttpEvaluatorConfig;
use crate::error::EvaluationError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Request body sent to the simulation endpoint
#[derive(Serialize)]
struct SimulateRequest<'a> {
    content: &'a Value,
    context: &'a Value,
}

/// Hands out [`HttpEvaluator`] instances sharing one connection pool
pub struct HttpEvaluatorProvider {
    client: Client,
    config: Arc<HttpEvaluatorConfig>,
}

impl HttpEvaluatorProvider {
    /// Create a provider for the configured endpoint
    pub fn new(config: HttpEvaluatorConfig) -> Result<Self, EvaluationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                EvaluationError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Endpoint this provider evaluates against
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl EvaluatorProvider for HttpEvaluatorProvider {
    fn acquire(&self) -> Result<Box<dyn DecisionEvaluator>, EvaluationError> {
        Ok(Box::new(HttpEvaluator {
            client: self.client.clone(),
            config: self.config.clone(),
            disposed: false,
        }))
    }
}

/// One engine instance backed by the remote endpoint
pub struct HttpEvaluator {
    client: Client,
    config: Arc<HttpEvaluatorConfig>,
    disposed: bool,
}

impl DecisionEvaluator for HttpEvaluator {
    fn create_decision(&self, rules: Value) -> Result<Box<dyn Decision>, EvaluationError> {
        if self.disposed {
            return Err(EvaluationError::Evaluation(
                "Evaluator has already been disposed".to_string(),
            ));
        }
        if !rules.is_object() {
            return Err(EvaluationError::InvalidGraph(
                "rules document must be a JSON object".to_string(),
            ));
        }

        Ok(Box::new(HttpDecision {
            client: self.client.clone(),
            config: self.config.clone(),
            content: rules,
        }))
    }

    fn dispose(&mut self) -> Result<(), EvaluationError> {
        if self.disposed {
            return Err(EvaluationError::Dispose(
                "Evaluator has already been disposed".to_string(),
            ));
        }
        self.disposed = true;
        Ok(())
    }
}

struct HttpDecision {
    client: Client,
    config: Arc<HttpEvaluatorConfig>,
    content: Value,
}

#[async_trait]
impl Decision for HttpDecision {
    async fn evaluate(&self, input: Value) -> Result<EvaluationResponse, EvaluationError> {
        let body = SimulateRequest {
            content: &self.content,
            context: &input,
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(ref key) = self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(|e| {
            EvaluationError::Transport(format!(
                "Failed to reach {}: {}",
                self.config.endpoint, e
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EvaluationError::Evaluation(format!(
                "Engine returned status {}: {}",
                status,
                error_detail(&detail)
            )));
        }

        response.json::<EvaluationResponse>().await.map_err(|e| {
            EvaluationError::Transport(format!("Failed to parse engine response: {}", e))
        })
    }
}

/// Pull a readable message out of an error body
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        _ => body.to_string(),
    }
}
