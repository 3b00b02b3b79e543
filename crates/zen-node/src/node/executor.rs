//! ZenNode - runs a batch of items through the decision evaluator

use super::work_item::{shape_result, WorkItem};
use crate::config::NodeConfig;
use crate::description::{zen_engine_description, NodeDescription};
use crate::error::{ItemError, NodeError, Result};
use crate::evaluator::{EvaluatorGuard, EvaluatorProvider};
use crate::item::NodeItem;
use crate::parameters::ParameterSource;
use serde_json::{Map, Value};
use std::sync::Arc;

/// The decision node.
///
/// Items are processed strictly in order, one at a time. Every item gets its
/// own evaluator instance, released before the next item starts.
pub struct ZenNode {
    provider: Arc<dyn EvaluatorProvider>,
    config: NodeConfig,
}

impl ZenNode {
    /// Create a node evaluating through `provider`
    pub fn new(provider: Arc<dyn EvaluatorProvider>, config: NodeConfig) -> Self {
        Self { provider, config }
    }

    /// Static description of this node
    pub fn description(&self) -> NodeDescription {
        zen_engine_description()
    }

    /// Get configuration
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Execute the node over `items` with the node's own configuration
    pub async fn execute(
        &self,
        items: &[NodeItem],
        parameters: &dyn ParameterSource,
    ) -> Result<Vec<NodeItem>> {
        self.execute_with_config(items, parameters, &self.config)
            .await
    }

    /// Execute the node over `items` with an explicit per-execution configuration.
    ///
    /// Returns exactly one output item per input item, in input order. With
    /// `continue_on_fail` off, the first failing item aborts the batch and no
    /// output is returned.
    pub async fn execute_with_config(
        &self,
        items: &[NodeItem],
        parameters: &dyn ParameterSource,
        config: &NodeConfig,
    ) -> Result<Vec<NodeItem>> {
        let mut output = Vec::with_capacity(items.len());
        let mut failed = 0usize;

        for (item_index, item) in items.iter().enumerate() {
            match self.process_item(item_index, item, parameters, config).await {
                Ok(json) => {
                    output.push(NodeItem::new(json).with_paired_item(item_index));
                }
                Err(e) if config.continue_on_fail => {
                    tracing::warn!(
                        item_index,
                        kind = e.kind(),
                        "Item failed, recording error: {}",
                        e
                    );
                    failed += 1;
                    output.push(NodeItem::error(e.to_string(), item_index));
                }
                Err(source) => {
                    tracing::error!(
                        item_index,
                        kind = source.kind(),
                        "Item failed, aborting batch: {}",
                        source
                    );
                    return Err(NodeError::ItemFailed { item_index, source });
                }
            }
        }

        tracing::info!(
            items = items.len(),
            failed,
            "Decision node processed batch"
        );

        Ok(output)
    }

    /// Resolve, evaluate and shape a single item
    async fn process_item(
        &self,
        item_index: usize,
        item: &NodeItem,
        parameters: &dyn ParameterSource,
        config: &NodeConfig,
    ) -> std::result::Result<Map<String, Value>, ItemError> {
        let work = WorkItem::resolve(item_index, item, parameters)?;
        tracing::debug!(item_index, "Evaluating item");

        let guard = EvaluatorGuard::acquire(self.provider.as_ref(), item_index)?;
        let outcome = work
            .evaluate(guard.evaluator(), config.evaluation_timeout)
            .await;
        let released = guard.release();

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                if let Err(release_err) = released {
                    tracing::warn!(
                        item_index,
                        "Failed to dispose evaluator after failed evaluation: {}",
                        release_err
                    );
                }
                return Err(e);
            }
        };
        released?;

        shape_result(response.result)
    }
}
