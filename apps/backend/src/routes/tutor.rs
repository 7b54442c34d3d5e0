//! AI tutor chat endpoint

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::{TutorRequest, TutorResponse};
use crate::AppState;

/// POST /api/ai-tutor
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<TutorRequest>,
) -> Result<Json<TutorResponse>> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let response = state.tutor.respond(&payload).await;
    Ok(Json(TutorResponse { response }))
}
