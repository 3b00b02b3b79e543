//! ZenNode - the decision node
//!
//! - `executor`: the batch loop and failure policy
//! - `work_item`: parameter resolution, scoped evaluation and result shaping
//! - `tests`: unit tests (test-only)

mod executor;
mod work_item;

pub use executor::ZenNode;
pub use work_item::{shape_result, WorkItem};

#[cfg(test)]
mod tests;
