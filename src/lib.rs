//! askdoc: document Q&A service with extractive and generative backends
//!
//! Uploaded documents (txt, pdf, csv, json) are normalized into a canonical
//! content shape; questions against that content are routed to either a
//! local ONNX span-extraction model or a remote completion service.

pub mod backends;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod ingestion;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use context::ContextAssembler;
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use ingestion::{DocumentFormat, DocumentNormalizer, FormatDetector};
pub use types::{Answer, AskRequest, DataType, NormalizedContent, UploadResponse};
