//! Session log API tests.

mod common;

use pretty_assertions::assert_eq;
use serde_json::Value;

use common::{dealt_pairs, flip, start_round, wait_for_resolution, TestContext};

#[tokio::test]
async fn test_sessions_empty() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/sessions").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["sessions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_active_round_not_recorded() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let round = start_round(&server, "animals", "easy", 4).await;
    let id = round["round_id"].as_str().unwrap().to_string();

    flip(&server, &id, 0).await;
    flip(&server, &id, 1).await;
    wait_for_resolution().await;

    let body: Value = server.get("/api/sessions").await.json();
    assert!(body["sessions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sessions_newest_first() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for category in ["animals", "fruits"] {
        let round = start_round(&server, category, "easy", 8).await;
        let id = round["round_id"].as_str().unwrap().to_string();
        for (a, b) in dealt_pairs(category, "easy", 8) {
            flip(&server, &id, a).await;
            flip(&server, &id, b).await;
            wait_for_resolution().await;
        }
    }

    let body: Value = server.get("/api/sessions").await.json();
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["category"], "fruits");
    assert_eq!(sessions[1]["category"], "animals");

    let session = &sessions[0];
    assert_eq!(session["difficulty"], "easy");
    assert_eq!(session["matched_pairs"], 4);
    assert_eq!(session["total_pairs"], 4);
    assert!(session["duration_secs"].as_i64().unwrap() >= 0);
    assert!(session["started_at"].is_string());
    assert!(session["finished_at"].is_string());
}
