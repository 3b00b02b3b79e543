//! HTTP evaluator example
//!
//! Evaluates a small decision graph against a running engine. Point
//! `ZEN_ENDPOINT` at the engine's simulation endpoint (default
//! `http://127.0.0.1:3000/api/simulate`).

use serde_json::json;
use zen_node::{FixedParameters, HttpEvaluatorConfig, NodeItem, ZenNodeBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("zen_node=debug")
        .init();

    let endpoint = std::env::var("ZEN_ENDPOINT")
        .unwrap_or_else(|_| "http://127.0.0.1:3000/api/simulate".to_string());
    println!("=== HTTP Evaluator Example ({}) ===\n", endpoint);

    let node = ZenNodeBuilder::new()
        .with_http_evaluator(HttpEvaluatorConfig::new(endpoint))
        .continue_on_fail(true)
        .build()?;

    let rules = json!({
        "nodes": [
            { "id": "in", "type": "inputNode", "name": "Request", "position": { "x": 0, "y": 0 } },
            {
                "id": "table",
                "type": "decisionTableNode",
                "name": "Tier",
                "position": { "x": 200, "y": 0 },
                "content": {
                    "hitPolicy": "first",
                    "inputs": [{ "id": "i1", "name": "Total", "field": "total" }],
                    "outputs": [{ "id": "o1", "name": "Tier", "field": "tier" }],
                    "rules": [
                        { "_id": "r1", "i1": "> 1000", "o1": "\"gold\"" },
                        { "_id": "r2", "i1": "", "o1": "\"standard\"" }
                    ]
                }
            },
            { "id": "out", "type": "outputNode", "name": "Response", "position": { "x": 400, "y": 0 } }
        ],
        "edges": [
            { "id": "e1", "sourceId": "in", "targetId": "table", "type": "edge" },
            { "id": "e2", "sourceId": "table", "targetId": "out", "type": "edge" }
        ]
    });
    let params = FixedParameters::new()
        .with_rules(rules)
        .with_input(r#"{"total": 1500}"#);

    let output = node.execute(&[NodeItem::default()], &params).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
