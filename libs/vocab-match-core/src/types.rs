//! Core types for the match game.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// A vocabulary item supplied by the card catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: String,
    /// Label in the learner's own language.
    pub native_label: String,
    /// Label in the language being learned. Two deck entries match when
    /// their target labels are equal.
    pub target_label: String,
    pub glyph: String,
    pub category: String,
    pub pronunciation: String,
}

impl CardDefinition {
    pub fn new(
        id: impl Into<String>,
        native_label: impl Into<String>,
        target_label: impl Into<String>,
        glyph: impl Into<String>,
        category: impl Into<String>,
        pronunciation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            native_label: native_label.into(),
            target_label: target_label.into(),
            glyph: glyph.into(),
            category: category.into(),
            pronunciation: pronunciation.into(),
        }
    }
}

/// Round difficulty preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl Difficulty {
    /// Number of pairs dealt for this difficulty.
    pub fn pair_count(self) -> usize {
        match self {
            Self::Easy => 4,
            Self::Medium => 6,
            Self::Hard => 8,
        }
    }

    /// Starting time budget in seconds.
    pub fn time_budget_secs(self) -> u32 {
        match self {
            Self::Easy => 120,
            Self::Medium => 180,
            Self::Hard => 240,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of one card on the board. Each vocabulary item is dealt
/// twice, so this is distinct from [`CardDefinition::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

impl InstanceId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Groups the two deck entries dealt from the same vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairKey(pub u32);

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub instance_id: InstanceId,
    pub pair_key: PairKey,
    pub card: CardDefinition,
}

impl DeckEntry {
    /// Whether two entries form a pair.
    pub fn pairs_with(&self, other: &DeckEntry) -> bool {
        self.pair_key == other.pair_key
    }
}

/// Round lifecycle phase. Transitions only leave `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Active,
    TimedOut,
    Completed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    TimedOut,
    Completed,
}

/// Final record of a finished round, handed to the result sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub reason: EndReason,
    /// Score including the time bonus, if any.
    pub final_score: u32,
    pub move_count: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    /// Percentage of pairs found, rounded to the nearest integer.
    pub accuracy: u32,
    pub time_bonus: u32,
}

/// What to do when a category has fewer cards than the difficulty needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortDeckPolicy {
    /// Refuse to start the round.
    Strict,
    /// Deal every available card, producing a shorter round.
    Lenient,
}

impl Default for ShortDeckPolicy {
    fn default() -> Self {
        Self::Strict
    }
}

impl ShortDeckPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl FromStr for ShortDeckPolicy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(GameError::UnknownShortDeckPolicy(other.to_string())),
        }
    }
}

/// Real-time pacing of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTiming {
    /// Interval between timer ticks. Each tick removes one second of budget.
    pub tick_interval_ms: u64,
    /// Delay between the second flip and its resolution.
    pub resolution_delay_ms: u64,
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            resolution_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::Easy.pair_count(), 4);
        assert_eq!(Difficulty::Medium.pair_count(), 6);
        assert_eq!(Difficulty::Hard.pair_count(), 8);
        assert_eq!(Difficulty::Easy.time_budget_secs(), 120);
        assert_eq!(Difficulty::Medium.time_budget_secs(), 180);
        assert_eq!(Difficulty::Hard.time_budget_secs(), 240);
    }

    #[test]
    fn difficulty_parses_names() {
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty("expert".to_string()))
        );
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn difficulty_serializes_snake_case() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn phase_terminal() {
        assert!(!Phase::Active.is_terminal());
        assert!(Phase::TimedOut.is_terminal());
        assert!(Phase::Completed.is_terminal());
    }

    #[test]
    fn short_deck_policy_round_trips_names() {
        assert_eq!("lenient".parse::<ShortDeckPolicy>(), Ok(ShortDeckPolicy::Lenient));
        assert_eq!("strict".parse::<ShortDeckPolicy>(), Ok(ShortDeckPolicy::Strict));
        assert_eq!(
            "loose".parse::<ShortDeckPolicy>(),
            Err(GameError::UnknownShortDeckPolicy("loose".to_string()))
        );
        assert_eq!(ShortDeckPolicy::default().as_str(), "strict");
    }
}
