//! Question answering endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{Answer, AskRequest};

/// POST /api/ask - Answer a question against normalized content
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<Answer>> {
    let start = Instant::now();

    tracing::info!(
        "Question: \"{}\" against {} (remote: {})",
        request.question,
        request.filename,
        request.use_remote
    );

    let answer = state.dispatcher().dispatch(&request).await?;

    tracing::info!(
        "Answered in {}ms (service: {:?}, confidence: {:.3})",
        start.elapsed().as_millis(),
        answer.service,
        answer.confidence
    );

    Ok(Json(answer))
}
