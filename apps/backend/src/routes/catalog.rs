//! Vocabulary catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::{CardListResponse, CategoryListResponse, CategorySummary};
use crate::AppState;

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    let categories = state
        .catalog
        .categories()
        .into_iter()
        .map(|name| {
            let card_count = state.catalog.cards_by_category(&name).len();
            CategorySummary { name, card_count }
        })
        .collect();

    Json(CategoryListResponse { categories })
}

/// GET /api/categories/{category}/cards
pub async fn list_cards(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CardListResponse>> {
    let cards = state.catalog.cards_by_category(&category);
    if cards.is_empty() {
        return Err(ApiError::NotFound(format!("Category {} not found", category)));
    }

    Ok(Json(CardListResponse { category, cards }))
}
