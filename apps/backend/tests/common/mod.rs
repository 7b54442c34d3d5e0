//! Common test utilities for the API integration tests.
//!
//! Every test gets its own router over the built-in vocabulary with a fast
//! round clock, so timers can be observed in real time.

pub mod fixtures;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use serde_json::Value;
use vocab_match_core::{
    build_deck, CardCatalog, Difficulty, GameRng, PairKey, RoundTiming, ShortDeckPolicy,
    StaticCatalog,
};

use vocab_match_backend::config::{Config, TutorConfig};
use vocab_match_backend::{build_router, AppState};

/// Tick length used by default in tests.
pub const TEST_TICK_MS: u64 = 20;
/// Resolution delay used by default in tests.
pub const TEST_RESOLUTION_MS: u64 = 10;

pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_timing(RoundTiming {
            tick_interval_ms: TEST_TICK_MS,
            resolution_delay_ms: TEST_RESOLUTION_MS,
        })
    }

    pub fn with_timing(timing: RoundTiming) -> Self {
        Self::with_config(Config {
            timing,
            // Nothing listens on the discard port, so tutor calls fall back.
            tutor: TutorConfig {
                endpoint: "http://127.0.0.1:9/chat".to_string(),
                token: None,
                model: "test-model".to_string(),
            },
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(&config, Arc::new(StaticCatalog::builtin()));
        let app = build_router(state.clone());
        Self { state, app }
    }

    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}

/// Start a round and return its response body.
pub async fn start_round(server: &TestServer, category: &str, difficulty: &str, seed: u64) -> Value {
    let response = server
        .post("/api/rounds")
        .json(&fixtures::start_round_request(category, difficulty, Some(seed)))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn flip(server: &TestServer, round_id: &str, instance_id: u64) -> Value {
    let response = server
        .post(&format!("/api/rounds/{}/flip", round_id))
        .json(&fixtures::flip_request(instance_id))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Instance ids of every pair in the board dealt for `seed`, in deal order.
///
/// Rounds started with a seed replay the same shuffle, so the deal can be
/// rebuilt here from the built-in catalog.
pub fn dealt_pairs(category: &str, difficulty: &str, seed: u64) -> Vec<(u64, u64)> {
    let cards = StaticCatalog::builtin().cards_by_category(category);
    let difficulty: Difficulty = difficulty.parse().unwrap();
    let deck = build_deck(
        category,
        &cards,
        difficulty,
        ShortDeckPolicy::Strict,
        &mut GameRng::new(seed),
    )
    .unwrap();

    let mut pairs: BTreeMap<PairKey, Vec<u64>> = BTreeMap::new();
    for entry in &deck {
        pairs
            .entry(entry.pair_key)
            .or_default()
            .push(u64::from(entry.instance_id.raw()));
    }
    pairs.into_values().map(|ids| (ids[0], ids[1])).collect()
}

/// Wait long enough for a pending resolution to settle.
pub async fn wait_for_resolution() {
    tokio::time::sleep(Duration::from_millis(TEST_RESOLUTION_MS * 5)).await;
}
