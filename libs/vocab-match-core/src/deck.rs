//! Deck construction: pick vocabulary, deal each item twice, shuffle.

use crate::error::{GameError, Result};
use crate::rng::GameRng;
use crate::types::{CardDefinition, DeckEntry, Difficulty, InstanceId, PairKey, ShortDeckPolicy};

/// Build a shuffled deck for one round.
///
/// Takes the first `difficulty.pair_count()` cards of `cards` and deals
/// each of them twice. After the shuffle every card is renumbered by its
/// board position, so an instance id says nothing about which card it
/// pairs with.
pub fn build_deck(
    category: &str,
    cards: &[CardDefinition],
    difficulty: Difficulty,
    policy: ShortDeckPolicy,
    rng: &mut GameRng,
) -> Result<Vec<DeckEntry>> {
    if cards.is_empty() {
        return Err(GameError::EmptyCategory {
            category: category.to_string(),
        });
    }

    let required = difficulty.pair_count();
    if cards.len() < required && policy == ShortDeckPolicy::Strict {
        return Err(GameError::InsufficientCards {
            category: category.to_string(),
            required,
            available: cards.len(),
        });
    }

    let mut deck = pair_up(cards.iter().take(required));
    rng.shuffle(&mut deck);
    for (position, entry) in deck.iter_mut().enumerate() {
        entry.instance_id = InstanceId::new(position as u32);
    }
    Ok(deck)
}

/// Deal every card twice, in order, without shuffling.
///
/// Copies of card `k` get ids `2k` and `2k + 1`. Only for hand-built
/// boards; [`build_deck`] renumbers after shuffling.
pub fn pair_up<'a>(cards: impl IntoIterator<Item = &'a CardDefinition>) -> Vec<DeckEntry> {
    let mut deck = Vec::new();
    for (idx, card) in cards.into_iter().enumerate() {
        let pair_key = PairKey(idx as u32);
        for copy in 0..2u32 {
            deck.push(DeckEntry {
                instance_id: InstanceId::new(idx as u32 * 2 + copy),
                pair_key,
                card: card.clone(),
            });
        }
    }
    deck
}
