//! Decision evaluator capability
//!
//! The node never evaluates rules itself. It talks to a decision engine
//! through three traits that mirror the engine's lifecycle:
//!
//! - [`EvaluatorProvider`]: hands out a fresh engine instance per work item
//! - [`DecisionEvaluator`]: an engine instance; builds decisions and must be disposed
//! - [`Decision`]: a loaded decision graph that evaluates input documents
//!
//! [`EvaluatorGuard`] scopes an instance so it is disposed exactly once on
//! every exit path.

mod guard;
mod http;

pub use guard::EvaluatorGuard;
pub use http::{HttpEvaluator, HttpEvaluatorProvider};

use crate::error::EvaluationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of a single decision evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// Decision output; its fields become the output item payload
    pub result: Value,

    /// Engine-reported evaluation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<String>,

    /// Per-node trace, when the engine was asked for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Value>,
}

impl EvaluationResponse {
    pub fn new(result: Value) -> Self {
        Self {
            result,
            performance: None,
            trace: None,
        }
    }
}

/// A decision graph loaded into an engine instance
#[async_trait]
pub trait Decision: Send + Sync {
    /// Evaluate the decision against an input document
    async fn evaluate(&self, input: Value) -> Result<EvaluationResponse, EvaluationError>;
}

/// An engine instance
#[async_trait]
pub trait DecisionEvaluator: Send + Sync {
    /// Load a rules document into a decision
    fn create_decision(&self, rules: Value) -> Result<Box<dyn Decision>, EvaluationError>;

    /// Release the resources held by this instance
    fn dispose(&mut self) -> Result<(), EvaluationError>;

    /// Load `rules` and evaluate `input` against it in one step
    async fn evaluate(
        &self,
        rules: Value,
        input: Value,
    ) -> Result<EvaluationResponse, EvaluationError> {
        let decision = self.create_decision(rules)?;
        decision.evaluate(input).await
    }
}

/// Source of engine instances
pub trait EvaluatorProvider: Send + Sync {
    /// Construct a new engine instance
    fn acquire(&self) -> Result<Box<dyn DecisionEvaluator>, EvaluationError>;
}
