//! Error types for vocab-match-core.

use thiserror::Error;

use crate::types::InstanceId;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised by the match-game engine.
///
/// Rejected flips are not errors; they come back as
/// [`FlipOutcome::Ignored`](crate::round::FlipOutcome::Ignored).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("category {category} has no cards")]
    EmptyCategory { category: String },

    #[error("category {category} has {available} cards, {required} required")]
    InsufficientCards {
        category: String,
        required: usize,
        available: usize,
    },

    #[error("card instance {0} is not in the deck")]
    UnknownCard(InstanceId),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown short deck policy: {0}")]
    UnknownShortDeckPolicy(String),
}
