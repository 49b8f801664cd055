//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;

use crate::error::{Error, Result};
use crate::ingestion::DocumentNormalizer;
use crate::server::state::AppState;
use crate::types::UploadResponse;

/// POST /api/upload - Upload a document, store it and return normalized content
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("failed to read multipart field: {e}")))?
    {
        let Some(filename) = field.file_name().map(|name| name.to_string()) else {
            continue;
        };

        if !state.detector().allowed(&filename) {
            return Err(Error::Validation(format!(
                "file type not allowed: {filename}"
            )));
        }
        let format = state.detector().detect(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Validation(format!("failed to read upload: {e}")))?;

        let max_upload_size = state.config().ingest.max_upload_size;
        if data.len() > max_upload_size {
            return Err(Error::Validation(format!(
                "upload of {} bytes exceeds the {} byte limit",
                data.len(),
                max_upload_size
            )));
        }

        tracing::info!("Processing upload: {} ({} bytes)", filename, data.len());

        // write-then-normalize: bytes land on disk before parsing starts
        let stored = state.uploads().store(&filename, &data).await?;
        let content = DocumentNormalizer::normalize(format, &data)?;

        return Ok(Json(UploadResponse {
            filename,
            stored_as: stored.stored_name,
            size_bytes: data.len() as u64,
            uploaded_at: Utc::now(),
            content,
        }));
    }

    Err(Error::Validation("no file field in upload".to_string()))
}
