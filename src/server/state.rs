//! Application state for the Q&A server

use std::sync::Arc;

use crate::backends::{AnswerBackend, ExtractiveBackend, GenerativeBackend};
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::ingestion::FormatDetector;
use crate::storage::UploadStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration (immutable after startup)
    config: AppConfig,
    /// Extension allow-set gate
    detector: FormatDetector,
    /// Backend router
    dispatcher: Dispatcher,
    /// Upload persistence
    uploads: UploadStore,
}

impl AppState {
    /// Build the process-wide state: load backends, prepare storage
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let local: Arc<dyn AnswerBackend> = Arc::new(ExtractiveBackend::load(&config.extractive)?);
        tracing::info!("Extractive backend ready (model: {})", local.model());

        let remote: Option<Arc<dyn AnswerBackend>> =
            match GenerativeBackend::from_config(&config.remote)? {
                Some(backend) => {
                    tracing::info!("Generative backend ready (model: {})", backend.model());
                    Some(Arc::new(backend))
                }
                None => {
                    tracing::warn!(
                        "No remote credential found. Generative backend disabled for this process."
                    );
                    None
                }
            };

        let dispatcher = Dispatcher::new(local, remote);
        let detector = FormatDetector::new(config.ingest.allowed_extensions.clone());
        let uploads = UploadStore::new(&config.ingest.upload_dir)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                detector,
                dispatcher,
                uploads,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the format detector
    pub fn detector(&self) -> &FormatDetector {
        &self.inner.detector
    }

    /// Get the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Get the upload store
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }
}
