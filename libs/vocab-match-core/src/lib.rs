//! Memory-matching game engine for vocabulary practice.
//!
//! Provides:
//! - Card catalog contract and the bundled starter vocabulary
//! - Deck dealing with a uniform, seedable shuffle
//! - Round state machine (flip, resolve, tick) with combo scoring
//! - Virtual-clock driver and result sink for deterministic play

pub mod catalog;
pub mod deck;
pub mod driver;
pub mod error;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod types;

pub use catalog::{CardCatalog, StaticCatalog};
pub use deck::build_deck;
pub use driver::{DriverEvent, ResultSink, RoundDriver, VirtualClock};
pub use error::{GameError, Result};
pub use rng::GameRng;
pub use round::{
    CardState, CardView, FlipOutcome, IgnoreReason, Resolution, ResolutionToken, Round,
    RoundSnapshot, TickOutcome,
};
pub use types::{
    CardDefinition, DeckEntry, Difficulty, EndReason, InstanceId, PairKey, Phase, RoundResult,
    RoundTiming, ShortDeckPolicy,
};
