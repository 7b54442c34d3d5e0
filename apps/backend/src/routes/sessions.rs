//! Finished-round history

use axum::{extract::State, Json};

use crate::models::SessionListResponse;
use crate::AppState;

/// GET /api/sessions
/// Returns finished rounds, newest first
pub async fn list(State(state): State<AppState>) -> Json<SessionListResponse> {
    Json(SessionListResponse {
        sessions: state.sessions.list(),
    })
}
