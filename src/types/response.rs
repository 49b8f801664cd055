//! Response types for upload and ask endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::NormalizedContent;

/// Which backend produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Local extractive model
    Local,
    /// Remote completion service
    Remote,
}

/// Answer produced by a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The answer text
    pub answer: String,
    /// Backend confidence in [0, 1]
    pub confidence: f32,
    /// Model identifier
    pub model: String,
    /// Which backend answered
    pub service: Service,
}

/// Response to a successful document upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Original (client-supplied) filename
    pub filename: String,
    /// Unique name the bytes were stored under
    pub stored_as: String,
    /// Upload size in bytes
    pub size_bytes: u64,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
    /// Normalized content for later ask requests
    pub content: NormalizedContent,
}
