//! Supported document formats and filename gating

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Closed set of document formats the service can normalize
///
/// Adding a format means adding a variant here and a matching arm in
/// `DocumentNormalizer::normalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain text file
    Txt,
    /// PDF document
    Pdf,
    /// CSV file
    Csv,
    /// JSON file
    Json,
}

impl DocumentFormat {
    /// Map a lowercase extension to a format
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(Self::Txt),
            "pdf" => Some(Self::Pdf),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Canonical extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Extension after the last dot, lowercased; `None` if the filename has no dot
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Validates filenames against the configured extension allow-set
#[derive(Debug, Clone)]
pub struct FormatDetector {
    allowed: HashSet<String>,
}

impl FormatDetector {
    /// Create a detector from the configured allow-set
    pub fn new(allowed: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed: allowed.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// True iff the filename has an extension in the allow-set
    pub fn allowed(&self, filename: &str) -> bool {
        match extension_of(filename) {
            Some(ext) => self.allowed.contains(&ext),
            None => false,
        }
    }

    /// Resolve the filename to a supported format
    ///
    /// Fails with `UnsupportedFormat` when the extension is missing, outside
    /// the allow-set, or allowed by config but unknown to the normalizer.
    pub fn detect(&self, filename: &str) -> Result<DocumentFormat> {
        let ext = extension_of(filename)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no extension: {filename}")))?;
        if !self.allowed.contains(&ext) {
            return Err(Error::UnsupportedFormat(ext));
        }
        DocumentFormat::from_extension(&ext).ok_or(Error::UnsupportedFormat(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;

    fn detector() -> FormatDetector {
        FormatDetector::new(IngestConfig::default().allowed_extensions)
    }

    #[test]
    fn allows_case_insensitive_extensions() {
        let detector = detector();
        assert!(detector.allowed("report.CSV"));
        assert!(detector.allowed("notes.txt"));
        assert!(detector.allowed("archive.data.json"));
    }

    #[test]
    fn rejects_disallowed_and_missing_extensions() {
        let detector = detector();
        assert!(!detector.allowed("binary.exe"));
        assert!(!detector.allowed("noext"));
    }

    #[test]
    fn detect_maps_to_format() {
        let detector = detector();
        assert_eq!(detector.detect("report.CSV").unwrap(), DocumentFormat::Csv);
        assert_eq!(detector.detect("doc.pdf").unwrap(), DocumentFormat::Pdf);
        assert!(matches!(
            detector.detect("binary.exe"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detector.detect("noext"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn allow_set_can_restrict_below_builtin_formats() {
        let detector = FormatDetector::new(vec!["txt".to_string()]);
        assert!(detector.allowed("a.txt"));
        assert!(!detector.allowed("a.csv"));
        assert!(matches!(
            detector.detect("a.csv"),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
