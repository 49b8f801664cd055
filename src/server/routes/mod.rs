//! API routes for the Q&A server

pub mod ask;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with body limit for multipart uploads
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Ask
        .route("/ask", post(ask::ask_question))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "askdoc",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A with extractive and generative answering",
        "endpoints": {
            "POST /api/upload": "Upload a document and receive its normalized content",
            "POST /api/ask": "Ask a question against normalized content",
            "GET /health": "Health check"
        },
        "formats": ["txt", "pdf", "csv", "json"]
    }))
}
