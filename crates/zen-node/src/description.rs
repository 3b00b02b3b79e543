//! Static node description rendered by the host

use crate::parameters::{INPUT_PARAMETER, RULES_PARAMETER};
use serde::{Deserialize, Serialize};

/// Connection type for node inputs and outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionType {
    Main,
}

/// Property type as understood by the host's UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Json,
    String,
    Boolean,
}

/// Default values applied when the node is added to a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefaults {
    pub name: String,
}

/// A configurable node property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub default: serde_json::Value,
    pub placeholder: String,
    pub description: String,
}

/// Everything the host needs to list, render and wire the node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<ConnectionType>,
    pub outputs: Vec<ConnectionType>,
    pub usable_as_tool: bool,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

fn json_property(display_name: &str, name: &str, description: &str) -> NodeProperty {
    NodeProperty {
        display_name: display_name.to_string(),
        name: name.to_string(),
        property_type: PropertyType::Json,
        default: serde_json::Value::String(String::new()),
        placeholder: String::new(),
        description: description.to_string(),
    }
}

/// Description of the Zen Engine node
pub fn zen_engine_description() -> NodeDescription {
    NodeDescription {
        display_name: "Zen Engine".to_string(),
        name: "zenEngine".to_string(),
        group: vec!["execution".to_string()],
        version: 1,
        description: "Executes rules using the Zen Engine (GoRules)".to_string(),
        defaults: NodeDefaults {
            name: "Zen Engine".to_string(),
        },
        inputs: vec![ConnectionType::Main],
        outputs: vec![ConnectionType::Main],
        usable_as_tool: true,
        properties: vec![
            json_property(
                "Rules",
                RULES_PARAMETER,
                "Definition of rules in JSON format (JDM)",
            ),
            json_property(
                "Input Data",
                INPUT_PARAMETER,
                "Input data to run against the rules",
            ),
        ],
    }
}
