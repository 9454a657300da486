//! Presentation-layer intents.
//!
//! The presentation layer never mutates state; it dispatches intents
//! into the engine and re-reads a snapshot afterwards. Intents may be
//! sent speculatively; invalid ones are silent no-ops, never errors.

use serde::{Deserialize, Serialize};

use super::card::CardId;
use super::difficulty::Difficulty;

/// The three limited-use power-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Permute the positions of all face-down cards.
    Shuffle,
    /// Highlight one member of an intact, unrevealed pair.
    Hint,
    /// Add time to the countdown.
    SlowTime,
}

impl std::fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerUpKind::Shuffle => write!(f, "shuffle"),
            PowerUpKind::Hint => write!(f, "hint"),
            PowerUpKind::SlowTime => write!(f, "slow-time"),
        }
    }
}

/// An intent dispatched by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Begin a session at the given difficulty.
    StartGame(Difficulty),
    /// Flip the card with the given ID.
    FlipCard(CardId),
    /// Spend one use of a power-up.
    UsePowerUp(PowerUpKind),
    /// Discard the session and regenerate a board at the same difficulty.
    Restart,
    /// Discard the session and return to the menu (no board).
    ReturnToMenu,
}
