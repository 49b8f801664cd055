//! Ask request types

use serde::{Deserialize, Serialize};

use super::content::{DataType, NormalizedContent};

/// A question against previously normalized document content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    pub question: String,

    /// Original filename the content came from
    pub filename: String,

    /// Expected content shape; must match the content tag
    pub data_type: DataType,

    /// Normalized content returned by the upload endpoint
    pub content: NormalizedContent,

    /// Route to the remote generative backend (default: local extractive)
    #[serde(default)]
    pub use_remote: bool,
}
