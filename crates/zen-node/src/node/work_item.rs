//! Per-item evaluation state and result shaping

use crate::error::ItemError;
use crate::evaluator::{DecisionEvaluator, EvaluationResponse};
use crate::item::NodeItem;
use crate::parameters::{
    get_parameter, into_document, ParameterSource, INPUT_PARAMETER, RULES_PARAMETER,
};
use serde_json::{Map, Value};
use std::time::Duration;

/// Resolved documents for one input item
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub item_index: usize,
    pub rules: Value,
    pub input: Value,
}

impl WorkItem {
    /// Resolve and parse the `rules` and `input` parameters for an item
    pub fn resolve(
        item_index: usize,
        item: &NodeItem,
        parameters: &dyn ParameterSource,
    ) -> Result<Self, ItemError> {
        let rules = into_document(
            RULES_PARAMETER,
            get_parameter(parameters, RULES_PARAMETER, item_index, item),
        )?;
        let input = into_document(
            INPUT_PARAMETER,
            get_parameter(parameters, INPUT_PARAMETER, item_index, item),
        )?;

        Ok(Self {
            item_index,
            rules,
            input,
        })
    }

    /// Evaluate on `evaluator`, bounded by `timeout` when one is set
    pub async fn evaluate(
        self,
        evaluator: &dyn DecisionEvaluator,
        timeout: Option<Duration>,
    ) -> Result<EvaluationResponse, ItemError> {
        let evaluation = evaluator.evaluate(self.rules, self.input);
        match timeout {
            Some(limit) => tokio::time::timeout(limit, evaluation)
                .await
                .map_err(|_| ItemError::Timeout(limit.as_millis()))?
                .map_err(ItemError::from),
            None => evaluation.await.map_err(ItemError::from),
        }
    }
}

/// Copy the fields of a decision result into a fresh output payload.
///
/// A `null` result yields an empty payload; any other non-object result is
/// rejected.
pub fn shape_result(result: Value) -> Result<Map<String, Value>, ItemError> {
    match result {
        Value::Object(fields) => Ok(fields.into_iter().collect()),
        Value::Null => Ok(Map::new()),
        other => Err(ItemError::InvalidResult(json_kind(&other).to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
