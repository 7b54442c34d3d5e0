pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_match_core::{CardCatalog, StaticCatalog};

use crate::config::Config;
use crate::services::rounds::RoundRegistry;
use crate::services::sessions::SessionLog;
use crate::services::tutor::TutorService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CardCatalog>,
    pub rounds: Arc<RoundRegistry>,
    pub sessions: Arc<SessionLog>,
    pub tutor: Arc<TutorService>,
}

impl AppState {
    pub fn new(config: &Config, catalog: Arc<dyn CardCatalog>) -> Self {
        let sessions = Arc::new(SessionLog::new());
        let rounds = RoundRegistry::new(
            catalog.clone(),
            sessions.clone(),
            config.timing,
            config.short_deck_policy,
            config.round_retention,
        );

        Self {
            catalog,
            rounds: Arc::new(rounds),
            sessions,
            tutor: Arc::new(TutorService::new(config.tutor.clone())),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Catalog routes
        .route("/api/categories", get(routes::catalog::list_categories))
        .route("/api/categories/{category}/cards", get(routes::catalog::list_cards))
        // Round routes
        .route("/api/rounds", post(routes::rounds::start))
        .route(
            "/api/rounds/{id}",
            get(routes::rounds::get).delete(routes::rounds::abandon),
        )
        .route("/api/rounds/{id}/flip", post(routes::rounds::flip))
        // Session routes
        .route("/api/sessions", get(routes::sessions::list))
        // Tutor routes
        .route("/api/ai-tutor", post(routes::tutor::chat))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = StaticCatalog::builtin();
    tracing::info!("Loaded {} vocabulary cards", catalog.len());

    let state = AppState::new(&config, Arc::new(catalog));
    let app = build_router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
