//! Scoped evaluator ownership

use super::{DecisionEvaluator, EvaluatorProvider};
use crate::error::EvaluationError;

/// Owns an engine instance for the duration of one work item.
///
/// Call [`EvaluatorGuard::release`] on the normal path to observe disposal
/// errors. If the guard is dropped without being released (early return,
/// timeout, unwinding) the instance is disposed in `Drop` and any error is
/// logged.
pub struct EvaluatorGuard {
    evaluator: Box<dyn DecisionEvaluator>,
    item_index: usize,
    released: bool,
}

impl EvaluatorGuard {
    /// Acquire a fresh instance from `provider` for the item at `item_index`
    pub fn acquire(
        provider: &dyn EvaluatorProvider,
        item_index: usize,
    ) -> Result<Self, EvaluationError> {
        let evaluator = provider.acquire()?;
        tracing::trace!(item_index, "Acquired evaluator");
        Ok(Self {
            evaluator,
            item_index,
            released: false,
        })
    }

    /// The guarded instance
    pub fn evaluator(&self) -> &dyn DecisionEvaluator {
        self.evaluator.as_ref()
    }

    /// Dispose the instance and report the outcome
    pub fn release(mut self) -> Result<(), EvaluationError> {
        self.released = true;
        tracing::trace!(item_index = self.item_index, "Releasing evaluator");
        self.evaluator.dispose()
    }
}

impl Drop for EvaluatorGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.evaluator.dispose() {
            tracing::warn!(
                item_index = self.item_index,
                "Failed to dispose evaluator on early exit: {}",
                e
            );
        }
    }
}
