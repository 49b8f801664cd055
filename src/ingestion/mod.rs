//! Document ingestion: format detection and normalization

pub mod format;
pub mod normalizer;

pub use format::{DocumentFormat, FormatDetector};
pub use normalizer::DocumentNormalizer;
