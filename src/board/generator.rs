//! Board generation.
//!
//! Builds the shuffled deck for one session:
//!
//! 1. draw `pairs` distinct templates from the pool, uniformly without
//!    replacement (partial Fisher-Yates over indices);
//! 2. per chosen template, draw one uniform suit, derive the color, and
//!    emit two face-down cards sharing name/flavor/suit/color with
//!    unique IDs;
//! 3. apply one uniform Fisher-Yates permutation to the whole deck.
//!
//! Sorting by a random comparator is not a uniform shuffle and is never
//! used here.

use tracing::debug;

use crate::cards::TemplatePool;
use crate::core::{Card, CardId, Difficulty, GameRng, Suit};
use crate::error::EngineError;

/// Generate a shuffled deck of `2 * pairs` cards.
///
/// Every `name` occurs exactly twice in the result, and the two cards
/// of each pair share flavor, suit, and color.
///
/// ## Errors
///
/// `EngineError::Configuration` when the difficulty requests zero pairs
/// or more pairs than the pool holds.
pub fn generate(
    difficulty: &Difficulty,
    pool: &TemplatePool,
    rng: &mut GameRng,
) -> Result<Vec<Card>, EngineError> {
    let pairs = difficulty.pairs;
    if pairs == 0 {
        return Err(EngineError::configuration(format!(
            "difficulty '{}' requests zero pairs",
            difficulty.name
        )));
    }
    if pairs > pool.len() {
        return Err(EngineError::configuration(format!(
            "difficulty '{}' requests {} pairs but the pool holds {} templates",
            difficulty.name,
            pairs,
            pool.len()
        )));
    }

    // Uniform draw without replacement: partial Fisher-Yates over the
    // index space, keeping the first `pairs` slots.
    let mut indices: Vec<usize> = (0..pool.len()).collect();
    for i in 0..pairs {
        let j = i + rng.gen_range_usize(0..indices.len() - i);
        indices.swap(i, j);
    }

    let templates = pool.templates();
    let mut deck = Vec::with_capacity(pairs * 2);
    let mut next_id = 0u32;

    for &idx in &indices[..pairs] {
        let template = &templates[idx];
        let suit = Suit::ALL[rng.gen_range_usize(0..Suit::ALL.len())];

        for _ in 0..2 {
            deck.push(Card::new(
                CardId::new(next_id),
                template.name.clone(),
                template.flavor,
                suit,
            ));
            next_id += 1;
        }
    }

    rng.shuffle(&mut deck);

    debug!(
        difficulty = %difficulty.name,
        pairs,
        deck_len = deck.len(),
        "board generated"
    );

    Ok(deck)
}
