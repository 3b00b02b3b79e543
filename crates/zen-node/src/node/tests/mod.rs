//! Unit tests for ZenNode

use super::*;
use crate::config::NodeConfig;
use crate::error::{EvaluationError, ItemError, NodeError};
use crate::evaluator::{Decision, DecisionEvaluator, EvaluationResponse, EvaluatorProvider};
use crate::item::NodeItem;
use crate::parameters::{FixedParameters, ItemFieldParameters};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What the fake engine does when asked to evaluate
#[derive(Clone)]
enum Behavior {
    /// Answer with `{ "result": input }`
    Echo,
    /// Sleep before answering
    Slow(Duration),
    /// Succeed but fail on dispose
    FailDispose,
    /// Return a fixed result value
    Result(Value),
}

struct FakeProvider {
    behavior: Behavior,
    acquired: Arc<AtomicUsize>,
    disposed: Arc<AtomicUsize>,
}

impl FakeProvider {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            acquired: Arc::new(AtomicUsize::new(0)),
            disposed: Arc::new(AtomicUsize::new(0)),
        })
    }
}

impl EvaluatorProvider for FakeProvider {
    fn acquire(&self) -> std::result::Result<Box<dyn DecisionEvaluator>, EvaluationError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeEvaluator {
            behavior: self.behavior.clone(),
            disposed: self.disposed.clone(),
        }))
    }
}

struct FakeEvaluator {
    behavior: Behavior,
    disposed: Arc<AtomicUsize>,
}

impl DecisionEvaluator for FakeEvaluator {
    fn create_decision(
        &self,
        _rules: Value,
    ) -> std::result::Result<Box<dyn Decision>, EvaluationError> {
        Ok(Box::new(FakeDecision {
            behavior: self.behavior.clone(),
        }))
    }

    fn dispose(&mut self) -> std::result::Result<(), EvaluationError> {
        self.disposed.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::FailDispose => Err(EvaluationError::Dispose("engine busy".to_string())),
            _ => Ok(()),
        }
    }
}

struct FakeDecision {
    behavior: Behavior,
}

#[async_trait]
impl Decision for FakeDecision {
    async fn evaluate(
        &self,
        input: Value,
    ) -> std::result::Result<EvaluationResponse, EvaluationError> {
        match &self.behavior {
            Behavior::Echo | Behavior::FailDispose => Ok(EvaluationResponse::new(input)),
            Behavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(EvaluationResponse::new(input))
            }
            Behavior::Result(value) => Ok(EvaluationResponse::new(value.clone())),
        }
    }
}

fn echo_params() -> FixedParameters {
    FixedParameters::new()
        .with_rules(json!({ "nodes": [], "edges": [] }))
        .with_input(r#"{"ok": true}"#)
}

#[test]
fn test_work_item_resolves_both_parameters() {
    let params = FixedParameters::new()
        .with_rules(r#"{"nodes": []}"#)
        .with_input(json!({ "age": 40 }));

    let work = WorkItem::resolve(5, &NodeItem::default(), &params).unwrap();
    assert_eq!(work.item_index, 5);
    assert_eq!(work.rules, json!({ "nodes": [] }));
    assert_eq!(work.input, json!({ "age": 40 }));
}

#[test]
fn test_work_item_reports_failing_parameter() {
    let params = FixedParameters::new()
        .with_rules(json!({}))
        .with_input("{not json");

    let err = WorkItem::resolve(0, &NodeItem::default(), &params).unwrap_err();
    match err {
        ItemError::InvalidJson { parameter, .. } => assert_eq!(parameter, "input"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_work_item_missing_rules_is_parse_error() {
    let params = FixedParameters::new().with_input(json!({}));
    let err = WorkItem::resolve(0, &NodeItem::default(), &params).unwrap_err();
    assert_eq!(err.kind(), "parse");
}

#[test]
fn test_shape_result_copies_object_fields() {
    let shaped = shape_result(json!({ "passed": true, "score": 10 })).unwrap();
    assert_eq!(Value::Object(shaped), json!({ "passed": true, "score": 10 }));
}

#[test]
fn test_shape_result_null_is_empty() {
    assert!(shape_result(Value::Null).unwrap().is_empty());
}

#[test]
fn test_shape_result_rejects_scalars() {
    let err = shape_result(json!([1, 2])).unwrap_err();
    assert!(matches!(err, ItemError::InvalidResult(ref kind) if kind == "array"));
    assert!(shape_result(json!("text")).is_err());
}

#[tokio::test]
async fn test_execute_empty_batch() {
    let provider = FakeProvider::new(Behavior::Echo);
    let node = ZenNode::new(provider.clone(), NodeConfig::default());

    let output = node.execute(&[], &echo_params()).await.unwrap();
    assert!(output.is_empty());
    assert_eq!(provider.acquired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_execute_marks_paired_items() {
    let provider = FakeProvider::new(Behavior::Echo);
    let node = ZenNode::new(provider, NodeConfig::default());
    let items = vec![NodeItem::default(); 3];

    let output = node.execute(&items, &echo_params()).await.unwrap();
    let paired: Vec<_> = output.iter().map(|i| i.paired_item).collect();
    assert_eq!(paired, vec![Some(0), Some(1), Some(2)]);
}

#[tokio::test]
async fn test_execute_reads_item_fields() {
    let provider = FakeProvider::new(Behavior::Echo);
    let node = ZenNode::new(provider, NodeConfig::default());
    let items = vec![
        NodeItem::from_value(json!({ "rules": {}, "input": { "n": 1 } })),
        NodeItem::from_value(json!({ "rules": "{}", "input": "{\"n\": 2}" })),
    ];

    let output = node
        .execute(&items, &ItemFieldParameters::same_names())
        .await
        .unwrap();

    assert_eq!(output[0].json.get("n"), Some(&json!(1)));
    assert_eq!(output[1].json.get("n"), Some(&json!(2)));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_fails_item_and_releases_evaluator() {
    let provider = FakeProvider::new(Behavior::Slow(Duration::from_secs(60)));
    let config = NodeConfig::new().with_evaluation_timeout(Duration::from_millis(100));
    let node = ZenNode::new(provider.clone(), config);

    let err = node
        .execute(&[NodeItem::default()], &echo_params())
        .await
        .unwrap_err();

    match err {
        NodeError::ItemFailed { item_index, source } => {
            assert_eq!(item_index, 0);
            assert!(matches!(source, ItemError::Timeout(100)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(provider.disposed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_not_hit_by_fast_evaluation() {
    let provider = FakeProvider::new(Behavior::Slow(Duration::from_millis(10)));
    let config = NodeConfig::new().with_evaluation_timeout(Duration::from_secs(1));
    let node = ZenNode::new(provider, config);

    let output = node
        .execute(&[NodeItem::default()], &echo_params())
        .await
        .unwrap();
    assert_eq!(output[0].json.get("ok"), Some(&json!(true)));
}

#[tokio::test]
async fn test_dispose_error_fails_item() {
    let provider = FakeProvider::new(Behavior::FailDispose);
    let node = ZenNode::new(provider.clone(), NodeConfig::new().continue_on_fail(true));

    let output = node
        .execute(&[NodeItem::default()], &echo_params())
        .await
        .unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(
        output[0].error_message(),
        Some("Failed to dispose evaluator: engine busy")
    );
    assert_eq!(provider.disposed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_non_object_result_is_recorded() {
    let provider = FakeProvider::new(Behavior::Result(json!(42)));
    let node = ZenNode::new(provider, NodeConfig::new().continue_on_fail(true));

    let output = node
        .execute(&[NodeItem::default()], &echo_params())
        .await
        .unwrap();

    assert_eq!(
        output[0].error_message(),
        Some("Evaluation result must be a JSON object, got number")
    );
    assert_eq!(output[0].paired_item, Some(0));
}

#[tokio::test]
async fn test_per_execution_config_overrides_node_config() {
    let provider = FakeProvider::new(Behavior::Echo);
    let node = ZenNode::new(provider, NodeConfig::default());
    let params = FixedParameters::new().with_rules("").with_input("{}");

    assert!(node.execute(&[NodeItem::default()], &params).await.is_err());

    let output = node
        .execute_with_config(
            &[NodeItem::default()],
            &params,
            &NodeConfig::new().continue_on_fail(true),
        )
        .await
        .unwrap();
    assert!(output[0].error_message().is_some());
}

#[test]
fn test_node_description() {
    let node = ZenNode::new(FakeProvider::new(Behavior::Echo), NodeConfig::default());
    assert_eq!(node.description().name, "zenEngine");
}
