//! Reading items and parameter values from the command line

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use zen_node::parameters::{INPUT_PARAMETER, RULES_PARAMETER};
use zen_node::{FixedParameters, ItemFieldParameters, NodeItem, ParameterSource};

/// Parse a batch of items.
///
/// Accepts a JSON array whose elements are either host items
/// (`{ "json": { ... } }`) or plain values, or a single value treated as a
/// one-item batch.
pub fn parse_items(text: &str) -> Result<Vec<NodeItem>> {
    let value: Value = serde_json::from_str(text).context("Items are not valid JSON")?;
    let values = match value {
        Value::Array(values) => values,
        other => vec![other],
    };

    values
        .into_iter()
        .map(|value| {
            if is_host_item(&value) {
                serde_json::from_value(value).context("Invalid item")
            } else {
                Ok(NodeItem::from_value(value))
            }
        })
        .collect()
}

fn is_host_item(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|map| map.get("json"))
        .map_or(false, Value::is_object)
}

/// Read items from `path`, stdin when `path` is `-`, or a single empty item
/// when no path is given
pub fn read_items(path: Option<&Path>) -> Result<Vec<NodeItem>> {
    match path {
        None => Ok(vec![NodeItem::default()]),
        Some(p) if p == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read items from stdin")?;
            parse_items(&text)
        }
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("Failed to read items from {}", p.display()))?;
            parse_items(&text)
        }
    }
}

/// Turn a parameter argument into a parameter value.
///
/// `@path` reads the file; anything else is taken literally. Either way the
/// value stays a string so the node parses it as JSON.
pub fn parameter_value(arg: &str) -> Result<Value> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read parameter file {}", path))?;
            Ok(Value::String(text))
        }
        None => Ok(Value::String(arg.to_string())),
    }
}

/// Parameters from the command line: item fields take precedence over fixed values
pub struct CliParameters {
    fields: ItemFieldParameters,
    fixed: FixedParameters,
}

impl CliParameters {
    pub fn new(
        rules: Option<&str>,
        input: Option<&str>,
        rules_field: Option<&str>,
        input_field: Option<&str>,
    ) -> Result<Self> {
        let mut fixed = FixedParameters::new();
        if let Some(arg) = rules {
            fixed = fixed.with_rules(parameter_value(arg)?);
        }
        if let Some(arg) = input {
            fixed = fixed.with_input(parameter_value(arg)?);
        }

        let mut fields = ItemFieldParameters::new();
        if let Some(field) = rules_field {
            fields = fields.map(RULES_PARAMETER, field);
        }
        if let Some(field) = input_field {
            fields = fields.map(INPUT_PARAMETER, field);
        }

        Ok(Self { fields, fixed })
    }
}

impl ParameterSource for CliParameters {
    fn resolve(&self, name: &str, item_index: usize, item: &NodeItem) -> Option<Value> {
        self.fields
            .resolve(name, item_index, item)
            .or_else(|| self.fixed.resolve(name, item_index, item))
    }
}
