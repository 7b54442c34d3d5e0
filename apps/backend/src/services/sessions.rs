//! In-memory log of finished rounds.
//!
//! This is the result sink for live rounds: every round that times out or
//! clears the board lands here exactly once. Nothing is persisted.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use vocab_match_core::{Difficulty, ResultSink, RoundResult};

use crate::models::GameSession;

/// Finished sessions, newest last.
#[derive(Debug, Default)]
pub struct SessionLog {
    sessions: Mutex<Vec<GameSession>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, session: GameSession) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.push(session);
    }

    /// All sessions, newest first.
    pub fn list(&self) -> Vec<GameSession> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identity of a live round, captured when it starts.
#[derive(Debug, Clone)]
pub struct RoundMeta {
    pub round_id: Uuid,
    pub category: String,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub started_at: DateTime<Utc>,
}

/// Result sink that turns a round result into a [`GameSession`].
#[derive(Debug, Clone)]
pub struct SessionRecorder {
    log: Arc<SessionLog>,
    meta: Arc<RoundMeta>,
}

impl SessionRecorder {
    pub fn new(log: Arc<SessionLog>, meta: Arc<RoundMeta>) -> Self {
        Self { log, meta }
    }
}

impl ResultSink for SessionRecorder {
    fn round_finished(&mut self, result: &RoundResult) {
        let finished_at = Utc::now();
        let session = GameSession {
            id: Uuid::new_v4(),
            round_id: self.meta.round_id,
            category: self.meta.category.clone(),
            difficulty: self.meta.difficulty,
            result: result.clone(),
            duration_secs: (finished_at - self.meta.started_at).num_seconds(),
            started_at: self.meta.started_at,
            finished_at,
        };

        tracing::info!(
            "Round {} finished ({:?}): score {}, {} moves, {}/{} pairs",
            self.meta.round_id,
            result.reason,
            result.final_score,
            result.move_count,
            result.matched_pairs,
            result.total_pairs
        );

        self.log.record(session);
    }
}
