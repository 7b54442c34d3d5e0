//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use vocab_match_core::GameError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Round closed: {0}")]
    RoundClosed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Game(GameError::EmptyCategory { .. }) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Game(_) => (StatusCode::BAD_REQUEST, "game_error"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::RoundClosed(_) => (StatusCode::GONE, "round_closed"),
            ApiError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_match_core::InstanceId;

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("round 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_empty_category_is_not_found() {
        let error = ApiError::from(GameError::EmptyCategory {
            category: "planets".to_string(),
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_insufficient_cards_is_bad_request() {
        let error = ApiError::from(GameError::InsufficientCards {
            category: "animals".to_string(),
            required: 8,
            available: 3,
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_round_closed_status() {
        let error = ApiError::RoundClosed("abc".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::GONE);
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal("unexpected error".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display_game() {
        let error = ApiError::from(GameError::UnknownCard(InstanceId::new(7)));
        assert_eq!(error.to_string(), "Game error: card instance 7 is not in the deck");
    }

    #[test]
    fn test_error_display_not_found() {
        let error = ApiError::NotFound("Round 123".to_string());
        assert_eq!(error.to_string(), "Not found: Round 123");
    }
}
