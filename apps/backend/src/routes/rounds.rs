//! Round lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{FlipRequest, FlipResponse, RoundResponse, StartRoundRequest};
use crate::AppState;

/// POST /api/rounds
/// Deals a new round and starts its timer
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartRoundRequest>,
) -> Result<(StatusCode, Json<RoundResponse>)> {
    let round = state.rounds.start(payload).await?;
    Ok((StatusCode::CREATED, Json(round)))
}

/// GET /api/rounds/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<RoundResponse>> {
    Ok(Json(state.rounds.get(round_id).await?))
}

/// POST /api/rounds/{id}/flip
pub async fn flip(
    State(state): State<AppState>,
    Path(round_id): Path<Uuid>,
    Json(payload): Json<FlipRequest>,
) -> Result<Json<FlipResponse>> {
    Ok(Json(state.rounds.flip(round_id, payload.instance_id).await?))
}

/// DELETE /api/rounds/{id}
/// Leaves the round; its timers stop and nothing is recorded
pub async fn abandon(
    State(state): State<AppState>,
    Path(round_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.rounds.abandon(round_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
