//! Zen Engine workflow node
//!
//! Runs workflow items through a JDM decision graph. For each item the node
//! resolves a `rules` and an `input` parameter, evaluates them on an injected
//! decision evaluator and emits the decision result as the output item.

pub mod builder;
pub mod config;
pub mod description;
pub mod error;
pub mod evaluator;
pub mod item;
pub mod node;
pub mod parameters;

// Re-export main types
pub use builder::ZenNodeBuilder;
pub use config::{HttpEvaluatorConfig, NodeConfig};
pub use description::{zen_engine_description, NodeDescription};
pub use error::{EvaluationError, ItemError, NodeError, Result};
pub use evaluator::{
    Decision, DecisionEvaluator, EvaluationResponse, EvaluatorGuard, EvaluatorProvider,
    HttpEvaluatorProvider,
};
pub use item::NodeItem;
pub use node::ZenNode;
pub use parameters::{FixedParameters, ItemFieldParameters, ParameterSource};
