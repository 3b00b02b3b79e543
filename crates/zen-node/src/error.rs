//! Node error types

use thiserror::Error;

/// Failure raised by a decision evaluator.
///
/// Covers everything the engine can report: an invalid decision graph, a
/// failure during evaluation, a transport problem for remote evaluators, and
/// errors raised while disposing the engine instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// The rules document was rejected when building the decision
    #[error("Invalid decision graph: {0}")]
    InvalidGraph(String),

    /// Evaluation of the decision against the input failed
    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    /// The evaluator could not be reached or answered with garbage
    #[error("Evaluator transport error: {0}")]
    Transport(String),

    /// Releasing the evaluator instance failed
    #[error("Failed to dispose evaluator: {0}")]
    Dispose(String),
}

/// Why a single work item failed.
///
/// The failure policy treats every variant the same way; the distinction only
/// exists for logs and for callers that want to inspect it.
#[derive(Error, Debug)]
pub enum ItemError {
    /// A parameter held a string that is not valid JSON
    #[error("Parameter '{parameter}' is not valid JSON: {source}")]
    InvalidJson {
        parameter: String,
        #[source]
        source: serde_json::Error,
    },

    /// The evaluator reported a failure
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// The evaluation did not finish within the configured timeout
    #[error("Evaluation timed out after {0} ms")]
    Timeout(u128),

    /// The evaluation result cannot be turned into an output item
    #[error("Evaluation result must be a JSON object, got {0}")]
    InvalidResult(String),
}

impl ItemError {
    /// Short tag naming the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            ItemError::InvalidJson { .. } => "parse",
            ItemError::Evaluation(_) => "evaluation",
            ItemError::Timeout(_) => "timeout",
            ItemError::InvalidResult(_) => "result",
        }
    }
}

/// Node error type
#[derive(Error, Debug)]
pub enum NodeError {
    /// An item failed while continue-on-fail was off; the batch was aborted
    #[error("Item {item_index} failed: {source}")]
    ItemFailed {
        item_index: usize,
        #[source]
        source: ItemError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl NodeError {
    /// Index of the item that aborted the batch, if any
    pub fn item_index(&self) -> Option<usize> {
        match self {
            NodeError::ItemFailed { item_index, .. } => Some(*item_index),
            NodeError::ConfigError(_) => None,
        }
    }
}

/// Result type for node operations
pub type Result<T> = std::result::Result<T, NodeError>;
