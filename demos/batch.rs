//! Batch execution example
//!
//! This example demonstrates:
//! - Plugging an in-process evaluator into the node
//! - Running a batch where one item carries malformed input
//! - The difference between continue-on-fail and abort-on-fail

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use zen_node::{
    Decision, DecisionEvaluator, EvaluationError, EvaluationResponse, EvaluatorProvider,
    ItemFieldParameters, NodeConfig, NodeItem, ZenNodeBuilder,
};

/// Toy engine: approves when `amount` is below the `limit` found in the rules
struct LimitEngine;

impl EvaluatorProvider for LimitEngine {
    fn acquire(&self) -> Result<Box<dyn DecisionEvaluator>, EvaluationError> {
        Ok(Box::new(LimitEvaluator))
    }
}

struct LimitEvaluator;

impl DecisionEvaluator for LimitEvaluator {
    fn create_decision(&self, rules: Value) -> Result<Box<dyn Decision>, EvaluationError> {
        let limit = rules["limit"]
            .as_f64()
            .ok_or_else(|| EvaluationError::InvalidGraph("rules need a numeric `limit`".to_string()))?;
        Ok(Box::new(LimitDecision { limit }))
    }

    fn dispose(&mut self) -> Result<(), EvaluationError> {
        Ok(())
    }
}

struct LimitDecision {
    limit: f64,
}

#[async_trait]
impl Decision for LimitDecision {
    async fn evaluate(&self, input: Value) -> Result<EvaluationResponse, EvaluationError> {
        let amount = input["amount"]
            .as_f64()
            .ok_or_else(|| EvaluationError::Evaluation("input needs a numeric `amount`".to_string()))?;
        Ok(EvaluationResponse::new(json!({
            "approved": amount < self.limit,
            "amount": amount,
        })))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("zen_node=debug")
        .init();

    println!("=== Batch Example ===\n");

    let node = ZenNodeBuilder::new()
        .with_provider(Arc::new(LimitEngine))
        .build()?;

    let rules = json!({ "limit": 100 });
    let items: Vec<NodeItem> = [json!(50), json!("not a number"), json!(250)]
        .into_iter()
        .map(|amount| {
            NodeItem::from_value(json!({
                "rules": rules,
                "input": { "amount": amount },
            }))
        })
        .collect();
    let params = ItemFieldParameters::same_names();

    let output = node
        .execute_with_config(&items, &params, &NodeConfig::new().continue_on_fail(true))
        .await?;

    println!("Continue on fail:");
    for item in &output {
        println!("  {}", serde_json::to_string(item)?);
    }

    println!("\nAbort on fail:");
    match node.execute(&items, &params).await {
        Ok(output) => println!("  unexpected success: {} items", output.len()),
        Err(e) => println!("  {}", e),
    }

    Ok(())
}
