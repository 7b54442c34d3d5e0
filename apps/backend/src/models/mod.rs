//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from vocab-match-core
pub use vocab_match_core::{
    CardDefinition, Difficulty, FlipOutcome, IgnoreReason, InstanceId, RoundResult, RoundSnapshot,
};

// === Catalog ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub card_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub category: String,
    pub cards: Vec<CardDefinition>,
}

// === Rounds ===

#[derive(Debug, Serialize, Deserialize)]
pub struct StartRoundRequest {
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Fixed shuffle seed, for replaying a deal.
    pub seed: Option<u64>,
}

/// Round state as returned by every round endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResponse {
    pub round_id: Uuid,
    pub category: String,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub snapshot: RoundSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RoundResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlipRequest {
    pub instance_id: InstanceId,
}

/// Flip outcome without the internal resolution token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlipOutcomeView {
    Ignored { reason: IgnoreReason },
    FirstRevealed,
    ResolutionPending,
}

impl From<FlipOutcome> for FlipOutcomeView {
    fn from(outcome: FlipOutcome) -> Self {
        match outcome {
            FlipOutcome::Ignored(reason) => Self::Ignored { reason },
            FlipOutcome::FirstRevealed => Self::FirstRevealed,
            FlipOutcome::ResolutionPending(_) => Self::ResolutionPending,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlipResponse {
    pub outcome: FlipOutcomeView,
    pub round: RoundResponse,
}

// === Sessions ===

/// A finished round, as recorded by the session log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub id: Uuid,
    pub round_id: Uuid,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub result: RoundResult,
    pub duration_secs: i64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<GameSession>,
}

// === AI tutor ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorRequest {
    pub message: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    pub student_name: String,
    pub student_age: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorResponse {
    pub response: String,
}
