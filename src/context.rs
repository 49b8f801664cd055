//! Context assembly: flattening normalized content into answerable text

use serde_json::Value;

use crate::types::NormalizedContent;

/// Flattens normalized content into the text blob handed to backends
pub struct ContextAssembler;

impl ContextAssembler {
    /// Assemble the question-answering context for some content
    ///
    /// Structured rows become `key: value` lines in mapping order;
    /// unstructured text passes through unchanged.
    pub fn assemble(content: &NormalizedContent) -> String {
        match content {
            NormalizedContent::Unstructured { content } => content.clone(),
            NormalizedContent::Structured { data, .. } => Self::assemble_structured(data),
        }
    }

    fn assemble_structured(data: &Value) -> String {
        match data {
            Value::Array(items) => {
                let lines: Vec<String> = items
                    .iter()
                    .map(Self::render_item)
                    .filter(|item| !item.is_empty())
                    .collect();
                lines.join("\n")
            }
            // a single top-level mapping reads as a one-item sequence
            Value::Object(_) => Self::render_item(data),
            Value::Null => String::new(),
            other => Self::render_scalar(other),
        }
    }

    fn render_item(item: &Value) -> String {
        match item {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| format!("{}: {}", key, Self::render_scalar(value)))
                .collect::<Vec<_>>()
                .join("\n"),
            other => Self::render_scalar(other),
        }
    }

    /// Strings render bare; everything else as compact JSON
    fn render_scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
