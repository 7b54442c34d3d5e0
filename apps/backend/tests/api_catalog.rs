//! Catalog API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::TestContext;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_list_categories() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/categories").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let categories = body["categories"].as_array().unwrap();
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["animals", "fruits", "vehicles", "colors"]);
    assert!(categories.iter().all(|c| c["card_count"] == 8));
}

#[tokio::test]
async fn test_list_cards() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/categories/fruits/cards").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["category"], "fruits");
    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 8);
    assert!(cards.iter().all(|c| c["category"] == "fruits"));
    assert!(cards.iter().all(|c| c["target_label"].is_string()));
}

#[tokio::test]
async fn test_unknown_category_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/categories/planets/cards").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "not_found");
}
