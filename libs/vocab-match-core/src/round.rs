//! Round state machine.
//!
//! A [`Round`] is driven by three operations:
//! - [`Round::flip`] reveals a card; the second reveal yields a
//!   [`ResolutionToken`]
//! - [`Round::resolve`] settles the two revealed cards once the caller's
//!   resolution delay has passed
//! - [`Round::tick`] removes one second from the clock
//!
//! The round owns no timers. Callers decide when ticks and resolutions
//! happen, see [`crate::driver::RoundDriver`] for a virtual-clock driver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::deck::build_deck;
use crate::error::{GameError, Result};
use crate::rng::GameRng;
use crate::scoring;
use crate::types::{
    CardDefinition, DeckEntry, Difficulty, EndReason, InstanceId, Phase, RoundResult,
    ShortDeckPolicy,
};

/// Handle for one pending resolution. Stale handles are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionToken(u64);

/// Why a flip was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    RoundOver,
    AlreadyMatched,
    AlreadyRevealed,
    ResolutionPending,
}

/// Result of a flip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed and no move was counted.
    Ignored(IgnoreReason),
    /// The card is face up, waiting for a second one.
    FirstRevealed,
    /// Two cards are face up. Pass the token to [`Round::resolve`].
    ResolutionPending(ResolutionToken),
}

/// Outcome of settling two revealed cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Match {
        first: InstanceId,
        second: InstanceId,
        earned: u32,
        /// Combo streak after this match.
        streak: u32,
    },
    Mismatch {
        first: InstanceId,
        second: InstanceId,
    },
}

/// Result of a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { time_remaining_secs: u32 },
    TimedOut,
    /// The round had already ended.
    Inactive,
}

/// Visibility of a card on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

/// One board position as the player sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub instance_id: InstanceId,
    pub state: CardState,
    /// Present only when the card is face up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<CardDefinition>,
}

/// Read-only view of a round for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub cards: Vec<CardView>,
    pub score: u32,
    pub move_count: u32,
    pub combo_streak: u32,
    pub time_remaining_secs: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub resolution_pending: bool,
}

/// State of one timed matching round.
#[derive(Debug, Clone)]
pub struct Round {
    deck: Vec<DeckEntry>,
    revealed: Vec<InstanceId>,
    matched: BTreeSet<InstanceId>,
    score: u32,
    move_count: u32,
    combo_streak: u32,
    time_remaining_secs: u32,
    phase: Phase,
    pending: Option<ResolutionToken>,
    next_token: u64,
    result_taken: bool,
}

impl Round {
    /// Deal a shuffled deck from `cards` and start the clock budget for
    /// `difficulty`.
    pub fn start(
        category: &str,
        cards: &[CardDefinition],
        difficulty: Difficulty,
        policy: ShortDeckPolicy,
        rng: &mut GameRng,
    ) -> Result<Self> {
        let deck = build_deck(category, cards, difficulty, policy, rng)?;
        tracing::debug!(
            category,
            difficulty = difficulty.as_str(),
            cards = deck.len(),
            seed = rng.seed(),
            "round dealt"
        );
        Ok(Self::with_deck(deck, difficulty.time_budget_secs()))
    }

    /// Start a round on a prepared deck. The deck order is kept as is.
    pub fn with_deck(deck: Vec<DeckEntry>, time_budget_secs: u32) -> Self {
        Self {
            deck,
            revealed: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            score: 0,
            move_count: 0,
            combo_streak: 0,
            time_remaining_secs: time_budget_secs,
            phase: Phase::Active,
            pending: None,
            next_token: 0,
            result_taken: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn combo_streak(&self) -> u32 {
        self.combo_streak
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn deck(&self) -> &[DeckEntry] {
        &self.deck
    }

    pub fn entry(&self, id: InstanceId) -> Option<&DeckEntry> {
        self.deck.iter().find(|e| e.instance_id == id)
    }

    pub fn revealed(&self) -> &[InstanceId] {
        &self.revealed
    }

    pub fn is_matched(&self, id: InstanceId) -> bool {
        self.matched.contains(&id)
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched.len() / 2
    }

    pub fn total_pairs(&self) -> usize {
        self.deck.len() / 2
    }

    /// Token of the resolution currently awaited, if any.
    pub fn pending_resolution(&self) -> Option<ResolutionToken> {
        self.pending
    }

    /// Turn a card face up.
    ///
    /// Returns [`GameError::UnknownCard`] for an id that was never dealt.
    pub fn flip(&mut self, id: InstanceId) -> Result<FlipOutcome> {
        if self.entry(id).is_none() {
            return Err(GameError::UnknownCard(id));
        }

        let ignored = if self.phase.is_terminal() {
            Some(IgnoreReason::RoundOver)
        } else if self.matched.contains(&id) {
            Some(IgnoreReason::AlreadyMatched)
        } else if self.revealed.contains(&id) {
            Some(IgnoreReason::AlreadyRevealed)
        } else if self.revealed.len() >= 2 {
            Some(IgnoreReason::ResolutionPending)
        } else {
            None
        };
        if let Some(reason) = ignored {
            return Ok(FlipOutcome::Ignored(reason));
        }

        self.revealed.push(id);
        self.move_count += 1;

        if self.revealed.len() == 1 {
            return Ok(FlipOutcome::FirstRevealed);
        }

        let token = ResolutionToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        Ok(FlipOutcome::ResolutionPending(token))
    }

    /// Settle the two revealed cards.
    ///
    /// Returns `None` when `token` is not the pending resolution, which
    /// includes resolutions discarded by a timeout.
    pub fn resolve(&mut self, token: ResolutionToken) -> Option<Resolution> {
        if self.pending != Some(token) || self.revealed.len() != 2 {
            return None;
        }
        self.pending = None;

        let (first, second) = (self.revealed[0], self.revealed[1]);
        self.revealed.clear();

        let is_pair = match (self.entry(first), self.entry(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        let resolution = if is_pair {
            self.matched.insert(first);
            self.matched.insert(second);
            let earned = scoring::earned_score(self.combo_streak);
            self.score += earned;
            self.combo_streak += 1;
            Resolution::Match {
                first,
                second,
                earned,
                streak: self.combo_streak,
            }
        } else {
            self.combo_streak = 0;
            Resolution::Mismatch { first, second }
        };
        tracing::debug!(?resolution, score = self.score, "resolved");

        if self.matched.len() == self.deck.len() {
            self.phase = Phase::Completed;
            tracing::debug!(
                score = self.score,
                time_remaining_secs = self.time_remaining_secs,
                "round completed"
            );
        }

        Some(resolution)
    }

    /// Remove one second from the clock.
    ///
    /// Reaching zero ends the round. A resolution still pending at that
    /// moment is discarded: its cards turn back over and score nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase.is_terminal() {
            return TickOutcome::Inactive;
        }

        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs > 0 {
            return TickOutcome::Running {
                time_remaining_secs: self.time_remaining_secs,
            };
        }

        if self.pending.take().is_some() {
            tracing::debug!("pending resolution discarded by timeout");
        }
        self.revealed.clear();
        self.phase = Phase::TimedOut;
        tracing::debug!(score = self.score, matched_pairs = self.matched_pairs(), "round timed out");
        TickOutcome::TimedOut
    }

    /// The final result, without consuming it. `None` while active.
    pub fn result(&self) -> Option<RoundResult> {
        let reason = match self.phase {
            Phase::Active => return None,
            Phase::TimedOut => EndReason::TimedOut,
            Phase::Completed => EndReason::Completed,
        };
        let time_bonus = match reason {
            EndReason::Completed => scoring::time_bonus(self.time_remaining_secs),
            EndReason::TimedOut => 0,
        };
        let matched_pairs = self.matched_pairs();
        let total_pairs = self.total_pairs();

        Some(RoundResult {
            reason,
            final_score: self.score + time_bonus,
            move_count: self.move_count,
            matched_pairs,
            total_pairs,
            accuracy: scoring::accuracy(matched_pairs, total_pairs),
            time_bonus,
        })
    }

    /// Emit the final result. Yields `Some` exactly once per round.
    pub fn take_result(&mut self) -> Option<RoundResult> {
        if self.result_taken {
            return None;
        }
        let result = self.result()?;
        self.result_taken = true;
        Some(result)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let cards = self
            .deck
            .iter()
            .map(|entry| {
                let state = if self.matched.contains(&entry.instance_id) {
                    CardState::Matched
                } else if self.revealed.contains(&entry.instance_id) {
                    CardState::Revealed
                } else {
                    CardState::Hidden
                };
                CardView {
                    instance_id: entry.instance_id,
                    state,
                    face: (state != CardState::Hidden).then(|| entry.card.clone()),
                }
            })
            .collect();

        RoundSnapshot {
            phase: self.phase,
            cards,
            score: self.score,
            move_count: self.move_count,
            combo_streak: self.combo_streak,
            time_remaining_secs: self.time_remaining_secs,
            matched_pairs: self.matched_pairs(),
            total_pairs: self.total_pairs(),
            resolution_pending: self.pending.is_some(),
        }
    }
}
