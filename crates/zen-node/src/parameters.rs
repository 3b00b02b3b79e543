//! Per-item parameter resolution
//!
//! The host resolves node parameters separately for every item, since a
//! parameter may be an expression over the item's data. [`ParameterSource`]
//! abstracts that lookup; a missing parameter falls back to the empty string,
//! which is what the node's `rules` and `input` properties default to.

use crate::error::ItemError;
use crate::item::NodeItem;
use serde_json::Value;
use std::collections::HashMap;

/// Name of the rules parameter
pub const RULES_PARAMETER: &str = "rules";

/// Name of the input parameter
pub const INPUT_PARAMETER: &str = "input";

/// Resolves node parameters for a given item
pub trait ParameterSource: Send + Sync {
    /// Resolve `name` for the item at `item_index`, or `None` when unset
    fn resolve(&self, name: &str, item_index: usize, item: &NodeItem) -> Option<Value>;
}

/// Resolve a parameter, substituting the empty-string default when unset
pub fn get_parameter(
    source: &dyn ParameterSource,
    name: &str,
    item_index: usize,
    item: &NodeItem,
) -> Value {
    source
        .resolve(name, item_index, item)
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Turn a resolved parameter into a JSON document.
///
/// Strings hold JSON text and are parsed; every other value is already
/// structured and is returned untouched.
pub fn into_document(name: &str, value: Value) -> std::result::Result<Value, ItemError> {
    match value {
        Value::String(text) => {
            serde_json::from_str(&text).map_err(|source| ItemError::InvalidJson {
                parameter: name.to_string(),
                source,
            })
        }
        other => Ok(other),
    }
}

/// Parameters fixed at node level, identical for every item
#[derive(Debug, Clone, Default)]
pub struct FixedParameters {
    values: HashMap<String, Value>,
}

impl FixedParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set the `rules` parameter
    pub fn with_rules(self, rules: impl Into<Value>) -> Self {
        self.with(RULES_PARAMETER, rules)
    }

    /// Set the `input` parameter
    pub fn with_input(self, input: impl Into<Value>) -> Self {
        self.with(INPUT_PARAMETER, input)
    }
}

impl ParameterSource for FixedParameters {
    fn resolve(&self, name: &str, _item_index: usize, _item: &NodeItem) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

/// Parameters read from fields of each item's own payload
#[derive(Debug, Clone, Default)]
pub struct ItemFieldParameters {
    fields: HashMap<String, String>,
}

impl ItemFieldParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map parameter `name` to the item field `field`
    pub fn map(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.fields.insert(name.into(), field.into());
        self
    }

    /// `rules` and `input` read from the item fields of the same names
    pub fn same_names() -> Self {
        Self::new()
            .map(RULES_PARAMETER, RULES_PARAMETER)
            .map(INPUT_PARAMETER, INPUT_PARAMETER)
    }
}

impl ParameterSource for ItemFieldParameters {
    fn resolve(&self, name: &str, _item_index: usize, item: &NodeItem) -> Option<Value> {
        let field = self.fields.get(name)?;
        item.json.get(field).cloned()
    }
}

impl<F> ParameterSource for F
where
    F: Fn(&str, usize, &NodeItem) -> Option<Value> + Send + Sync,
{
    fn resolve(&self, name: &str, item_index: usize, item: &NodeItem) -> Option<Value> {
        self(name, item_index, item)
    }
}
