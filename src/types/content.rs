//! Canonical content representation produced by document normalization

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical content shape for a normalized document
///
/// Tabular sources (CSV) carry their header order in `columns`; free-form
/// structured sources (JSON) omit it. Text-bearing sources (TXT, PDF) are
/// unstructured. The serialized form is the wire format clients echo back
/// on `/api/ask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NormalizedContent {
    /// Structured data: rows of mappings or an arbitrary JSON value
    Structured {
        data: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    /// Plain or extracted text
    Unstructured { content: String },
}

impl NormalizedContent {
    /// Build structured content from tabular rows and their header order
    pub fn tabular(rows: Vec<Value>, columns: Vec<String>) -> Self {
        Self::Structured {
            data: Value::Array(rows),
            columns: Some(columns),
        }
    }

    /// Build structured content from an arbitrary JSON value
    pub fn json(data: Value) -> Self {
        Self::Structured {
            data,
            columns: None,
        }
    }

    /// Build unstructured content from text
    pub fn text(content: impl Into<String>) -> Self {
        Self::Unstructured {
            content: content.into(),
        }
    }

    /// The data type tag of this content
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Structured { .. } => DataType::Structured,
            Self::Unstructured { .. } => DataType::Unstructured,
        }
    }
}

/// Data type tag supplied on ask requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Structured,
    Unstructured,
}

impl DataType {
    /// Whether this tag matches the content's shape
    pub fn matches(&self, content: &NormalizedContent) -> bool {
        *self == content.data_type()
    }

    /// Lowercase name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Unstructured => "unstructured",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tabular_wire_format_carries_columns() {
        let content = NormalizedContent::tabular(
            vec![json!({"a": "1", "b": "2"})],
            vec!["a".to_string(), "b".to_string()],
        );
        let wire = serde_json::to_value(&content).unwrap();
        assert_eq!(
            wire,
            json!({
                "type": "structured",
                "data": [{"a": "1", "b": "2"}],
                "columns": ["a", "b"],
            })
        );
    }

    #[test]
    fn json_wire_format_omits_columns() {
        let content = NormalizedContent::json(json!({"x": 1}));
        let wire = serde_json::to_value(&content).unwrap();
        assert_eq!(wire, json!({"type": "structured", "data": {"x": 1}}));
    }

    #[test]
    fn unstructured_round_trips() {
        let content = NormalizedContent::text("hello world");
        let wire = serde_json::to_string(&content).unwrap();
        let back: NormalizedContent = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn data_type_matches_tag() {
        let structured = NormalizedContent::json(json!([1, 2]));
        let unstructured = NormalizedContent::text("t");
        assert!(DataType::Structured.matches(&structured));
        assert!(!DataType::Structured.matches(&unstructured));
        assert!(DataType::Unstructured.matches(&unstructured));
    }
}
