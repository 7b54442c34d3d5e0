//! Registry of live rounds.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;
use vocab_match_core::{CardCatalog, GameRng, InstanceId, Round, RoundTiming, ShortDeckPolicy};

use crate::error::{ApiError, Result};
use crate::models::{FlipResponse, RoundResponse, StartRoundRequest};
use crate::services::round_task::{RoundTask, RoundView, TaskGone};
use crate::services::sessions::{RoundMeta, SessionLog, SessionRecorder};

#[derive(Debug, Clone)]
struct LiveRound {
    meta: Arc<RoundMeta>,
    task: RoundTask,
}

impl LiveRound {
    fn response(&self, view: RoundView) -> RoundResponse {
        RoundResponse {
            round_id: self.meta.round_id,
            category: self.meta.category.clone(),
            difficulty: self.meta.difficulty,
            seed: self.meta.seed,
            snapshot: view.snapshot,
            result: view.result,
        }
    }
}

type LiveRounds = Arc<RwLock<HashMap<Uuid, LiveRound>>>;

/// Starts rounds and routes player commands to their tasks.
///
/// A finished round stays reachable for `retention`, then it is dropped
/// from the registry along with its task.
pub struct RoundRegistry {
    catalog: Arc<dyn CardCatalog>,
    sessions: Arc<SessionLog>,
    timing: RoundTiming,
    policy: ShortDeckPolicy,
    retention: Duration,
    rounds: LiveRounds,
}

impl RoundRegistry {
    pub fn new(
        catalog: Arc<dyn CardCatalog>,
        sessions: Arc<SessionLog>,
        timing: RoundTiming,
        policy: ShortDeckPolicy,
        retention: Duration,
    ) -> Self {
        Self {
            catalog,
            sessions,
            timing,
            policy,
            retention,
            rounds: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Deal a new round and start its clock.
    pub async fn start(&self, request: StartRoundRequest) -> Result<RoundResponse> {
        let cards = self.catalog.cards_by_category(&request.category);
        let mut rng = match request.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let round = Round::start(
            &request.category,
            &cards,
            request.difficulty,
            self.policy,
            &mut rng,
        )?;

        let meta = Arc::new(RoundMeta {
            round_id: Uuid::new_v4(),
            category: request.category,
            difficulty: request.difficulty,
            seed: rng.seed(),
            started_at: Utc::now(),
        });
        let view = RoundView {
            snapshot: round.snapshot(),
            result: None,
        };
        let recorder = SessionRecorder::new(self.sessions.clone(), meta.clone());
        let (task, finished) = RoundTask::spawn(round, self.timing, self.retention, recorder);
        let live = LiveRound {
            meta: meta.clone(),
            task,
        };

        tracing::info!(
            "Started round {} ({}, {})",
            meta.round_id,
            meta.category,
            meta.difficulty
        );

        let response = live.response(view);
        self.rounds.write().await.insert(meta.round_id, live);

        let rounds = self.rounds.clone();
        let round_id = meta.round_id;
        tokio::spawn(async move {
            let _ = finished.await;
            if rounds.write().await.remove(&round_id).is_some() {
                tracing::debug!("Released round {}", round_id);
            }
        });

        Ok(response)
    }

    pub async fn get(&self, round_id: Uuid) -> Result<RoundResponse> {
        let live = self.find(round_id).await?;
        let view = live.task.view().await.map_err(|TaskGone| closed(round_id))?;
        Ok(live.response(view))
    }

    pub async fn flip(&self, round_id: Uuid, instance_id: InstanceId) -> Result<FlipResponse> {
        let live = self.find(round_id).await?;
        let (outcome, view) = live
            .task
            .flip(instance_id)
            .await
            .map_err(|TaskGone| closed(round_id))??;

        Ok(FlipResponse {
            outcome: outcome.into(),
            round: live.response(view),
        })
    }

    /// Stop a round early. Its timers are cancelled and no session is
    /// recorded unless it had already finished.
    pub async fn abandon(&self, round_id: Uuid) -> Result<()> {
        let live = self
            .rounds
            .write()
            .await
            .remove(&round_id)
            .ok_or_else(|| not_found(round_id))?;
        live.task.abandon().await;

        tracing::info!("Abandoned round {}", round_id);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.rounds.read().await.len()
    }

    async fn find(&self, round_id: Uuid) -> Result<LiveRound> {
        self.rounds
            .read()
            .await
            .get(&round_id)
            .cloned()
            .ok_or_else(|| not_found(round_id))
    }
}

fn not_found(round_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Round {} not found", round_id))
}

fn closed(round_id: Uuid) -> ApiError {
    ApiError::RoundClosed(round_id.to_string())
}
