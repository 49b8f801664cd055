//! Format-specific normalization of raw document bytes

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::NormalizedContent;

use super::format::DocumentFormat;

/// Converts raw bytes of a known format into canonical content
pub struct DocumentNormalizer;

impl DocumentNormalizer {
    /// Normalize raw bytes by extension
    ///
    /// Fails with `UnsupportedFormat` when no normalizer exists for the
    /// extension.
    pub fn normalize_extension(extension: &str, data: &[u8]) -> Result<NormalizedContent> {
        let format = DocumentFormat::from_extension(&extension.to_lowercase())
            .ok_or_else(|| Error::UnsupportedFormat(extension.to_string()))?;
        Self::normalize(format, data)
    }

    /// Normalize raw bytes of a known format
    pub fn normalize(format: DocumentFormat, data: &[u8]) -> Result<NormalizedContent> {
        match format {
            DocumentFormat::Csv => Self::normalize_csv(data),
            DocumentFormat::Json => Self::normalize_json(data),
            DocumentFormat::Pdf => Self::normalize_pdf(data),
            DocumentFormat::Txt => Self::normalize_txt(data),
        }
    }

    /// CSV: header order becomes `columns`, each record an ordered mapping
    fn normalize_csv(data: &[u8]) -> Result<NormalizedContent> {
        let mut reader = csv::Reader::from_reader(data);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| Error::parse("csv", e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::parse("csv", e.to_string()))?;
            let mut row = serde_json::Map::new();
            for (column, cell) in columns.iter().zip(record.iter()) {
                row.insert(column.clone(), Value::String(cell.to_string()));
            }
            rows.push(Value::Object(row));
        }

        Ok(NormalizedContent::tabular(rows, columns))
    }

    /// JSON: parsed as a generic value, no column metadata
    fn normalize_json(data: &[u8]) -> Result<NormalizedContent> {
        let value: Value =
            serde_json::from_slice(data).map_err(|e| Error::parse("json", e.to_string()))?;
        Ok(NormalizedContent::json(value))
    }

    /// PDF: page texts concatenated in page order, one newline per page
    ///
    /// A page with no extractable text contributes an empty line; only an
    /// unreadable document fails.
    fn normalize_pdf(data: &[u8]) -> Result<NormalizedContent> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::parse("pdf", e.to_string()))?;

        let mut text = String::new();
        for page_number in doc.get_pages().keys() {
            if let Ok(page_text) = doc.extract_text(&[*page_number]) {
                text.push_str(page_text.trim_end_matches('\n'));
            }
            text.push('\n');
        }

        Ok(NormalizedContent::text(text))
    }

    /// TXT: bytes read as text verbatim
    fn normalize_txt(data: &[u8]) -> Result<NormalizedContent> {
        Ok(NormalizedContent::text(
            String::from_utf8_lossy(data).into_owned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn csv_preserves_header_and_row_order() {
        let content = DocumentNormalizer::normalize(DocumentFormat::Csv, b"a,b\n1,2\n").unwrap();
        assert_eq!(
            content,
            NormalizedContent::tabular(
                vec![json!({"a": "1", "b": "2"})],
                vec!["a".to_string(), "b".to_string()],
            )
        );
    }

    #[test]
    fn csv_multiple_rows_keep_input_order() {
        let content =
            DocumentNormalizer::normalize(DocumentFormat::Csv, b"name,age\nbob,30\nann,25\n")
                .unwrap();
        match content {
            NormalizedContent::Structured { data, columns } => {
                assert_eq!(columns, Some(vec!["name".to_string(), "age".to_string()]));
                assert_eq!(
                    data,
                    json!([{"name": "bob", "age": "30"}, {"name": "ann", "age": "25"}])
                );
            }
            other => panic!("expected structured content, got {other:?}"),
        }
    }

    #[test]
    fn ragged_csv_is_a_parse_error() {
        let result = DocumentNormalizer::normalize(DocumentFormat::Csv, b"a,b\n1,2,3\n");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn json_value_has_no_columns() {
        let content = DocumentNormalizer::normalize(DocumentFormat::Json, br#"{"x":1}"#).unwrap();
        assert_eq!(content, NormalizedContent::json(json!({"x": 1})));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = DocumentNormalizer::normalize(DocumentFormat::Json, b"{broken");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn txt_passes_text_through_verbatim() {
        let content = DocumentNormalizer::normalize(DocumentFormat::Txt, b"hello world").unwrap();
        assert_eq!(content, NormalizedContent::text("hello world"));
    }

    #[test]
    fn corrupt_pdf_is_a_parse_error() {
        let result = DocumentNormalizer::normalize(DocumentFormat::Pdf, b"not a pdf at all");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = DocumentNormalizer::normalize_extension("exe", b"MZ");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
