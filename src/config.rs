//! Configuration for the document Q&A service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the remote completion credential
pub const REMOTE_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main service configuration
///
/// Immutable after startup; constructed once and handed to the server state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload and normalization configuration
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Local extractive model configuration
    #[serde(default)]
    pub extractive: ExtractiveConfig,
    /// Remote completion service configuration
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Fill the remote credential from the environment if the config left it unset
    pub fn with_env_credentials(mut self) -> Self {
        if self.remote.api_key.is_none() {
            if let Ok(key) = std::env::var(REMOTE_API_KEY_ENV) {
                if !key.trim().is_empty() {
                    self.remote.api_key = Some(key);
                }
            }
        }
        self
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS (allow-all, for the browser frontend)
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// Upload and normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Extensions accepted for upload (lowercase, no dot)
    pub allowed_extensions: Vec<String>,
    /// Maximum upload size in bytes (default: 16 MiB)
    pub max_upload_size: usize,
    /// Directory uploaded files are written to
    pub upload_dir: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![
                "txt".to_string(),
                "pdf".to_string(),
                "csv".to_string(),
                "json".to_string(),
            ],
            max_upload_size: 16 * 1024 * 1024, // 16 MiB
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

/// Local extractive model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractiveConfig {
    /// Directory holding `model.onnx` and `tokenizer.json`
    pub model_dir: PathBuf,
    /// Model identifier reported in answers
    pub model_id: String,
    /// Maximum input sequence length in tokens
    pub max_seq_len: usize,
    /// Token overlap between context windows
    pub doc_stride: usize,
    /// Maximum answer span length in tokens
    pub max_answer_len: usize,
    /// Intra-op threads for the ONNX session
    pub intra_threads: usize,
}

impl Default for ExtractiveConfig {
    fn default() -> Self {
        Self {
            model_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("askdoc")
                .join("models")
                .join("roberta-base-squad2"),
            model_id: "roberta-base-squad2".to_string(),
            max_seq_len: 384,
            doc_stride: 128,
            max_answer_len: 30,
            intra_threads: 4,
        }
    }
}

/// Remote completion service configuration
///
/// The backend is enabled for the process lifetime iff `api_key` resolves at
/// startup (config file or environment).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// API credential; absent disables the remote backend
    pub api_key: Option<String>,
    /// Chat completions base URL
    pub base_url: String,
    /// Completion model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token cap
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.3, // lower for more factual answers
            max_tokens: 500,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_four_formats() {
        let config = AppConfig::default();
        assert_eq!(
            config.ingest.allowed_extensions,
            vec!["txt", "pdf", "csv", "json"]
        );
        assert_eq!(config.ingest.max_upload_size, 16 * 1024 * 1024);
        assert!(config.remote.api_key.is_none());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            enable_cors = false

            [remote]
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.remote.api_key.as_deref(), Some("sk-test"));
        // untouched sections keep defaults
        assert_eq!(config.remote.model, "gpt-3.5-turbo");
        assert_eq!(config.extractive.max_seq_len, 384);
    }
}
