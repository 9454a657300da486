//! Difficulty selection.
//!
//! A `Difficulty` fixes the board size and time budget for one session.
//! It is chosen before `start` and immutable for the session's lifetime.

use serde::{Deserialize, Serialize};

/// Board size and time budget for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Human-readable name (for display/debugging).
    pub name: String,

    /// Number of card pairs on the board (deck length is `2 * pairs`).
    pub pairs: usize,

    /// Countdown starting value in seconds.
    pub time_limit_secs: u32,
}

impl Difficulty {
    /// 6 pairs, 60 seconds.
    #[must_use]
    pub fn easy() -> Self {
        Self::custom("easy", 6, 60)
    }

    /// 10 pairs, 90 seconds.
    #[must_use]
    pub fn medium() -> Self {
        Self::custom("medium", 10, 90)
    }

    /// 15 pairs, 120 seconds.
    #[must_use]
    pub fn hard() -> Self {
        Self::custom("hard", 15, 120)
    }

    /// Create a custom difficulty.
    ///
    /// Pair-count validity against the template pool is checked at board
    /// generation, not here, since the pool is a separate input.
    #[must_use]
    pub fn custom(name: impl Into<String>, pairs: usize, time_limit_secs: u32) -> Self {
        Self {
            name: name.into(),
            pairs,
            time_limit_secs,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} pairs, {}s)",
            self.name, self.pairs, self.time_limit_secs
        )
    }
}
