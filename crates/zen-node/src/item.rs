//! Workflow items exchanged with the host

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of work flowing between workflow nodes.
///
/// Serialized with the host's field names, so a batch can be read from and
/// written to the host's JSON representation directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeItem {
    /// Item payload
    #[serde(default)]
    pub json: Map<String, Value>,

    /// Index of the input item this output item originates from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<usize>,
}

impl NodeItem {
    /// Create an item from a payload
    pub fn new(json: Map<String, Value>) -> Self {
        Self {
            json,
            paired_item: None,
        }
    }

    /// Create an item from any JSON value; objects become the payload, anything
    /// else is stored under a `data` field
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(json) => Self::new(json),
            other => {
                let mut json = Map::new();
                json.insert("data".to_string(), other);
                Self::new(json)
            }
        }
    }

    /// Create the error-shaped record emitted under continue-on-fail
    pub fn error(message: impl Into<String>, item_index: usize) -> Self {
        let mut json = Map::new();
        json.insert("error".to_string(), Value::String(message.into()));
        Self {
            json,
            paired_item: Some(item_index),
        }
    }

    /// Link this item to its originating input item
    pub fn with_paired_item(mut self, item_index: usize) -> Self {
        self.paired_item = Some(item_index);
        self
    }

    /// Error message, if this is an error record
    pub fn error_message(&self) -> Option<&str> {
        self.json.get("error").and_then(Value::as_str)
    }
}
