//! Scoring and timing rules.
//!
//! `Ruleset` gathers the tunable constants of the match protocol: score
//! bonuses, time adjustments, delay windows, and power-up grants. The
//! defaults are the standard game; tests and variants override fields
//! through the builder methods.

use serde::{Deserialize, Serialize};

use super::session::PowerUpCounts;

/// Tunable constants for one engine instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Score awarded per matched pair.
    pub match_bonus: u32,

    /// Seconds added to the countdown per matched pair.
    pub match_time_bonus: u32,

    /// Seconds removed from the countdown when a mismatch resolves.
    pub mismatch_penalty: u32,

    /// The countdown never drops below this via a mismatch penalty.
    /// Only countdown ticks can reach zero.
    pub mismatch_time_floor: u32,

    /// How long a mismatched pair stays revealed before reverting.
    pub mismatch_delay_ms: u64,

    /// How long a hint highlight lasts before clearing itself.
    pub hint_duration_ms: u64,

    /// Seconds added to the countdown by the slow-time power-up.
    pub slow_time_bonus: u32,

    /// Shuffle uses granted at session start.
    pub shuffle_grants: u8,

    /// Hint uses granted at session start.
    pub hint_grants: u8,

    /// Slow-time uses granted at session start.
    pub slow_time_grants: u8,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            match_bonus: 10,
            match_time_bonus: 5,
            mismatch_penalty: 2,
            mismatch_time_floor: 1,
            mismatch_delay_ms: 1_000,
            hint_duration_ms: 3_000,
            slow_time_bonus: 10,
            shuffle_grants: 1,
            hint_grants: 2,
            slow_time_grants: 1,
        }
    }
}

impl Ruleset {
    /// Create the standard ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mismatch reveal window.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    /// Set the hint highlight duration.
    #[must_use]
    pub fn with_hint_duration_ms(mut self, ms: u64) -> Self {
        self.hint_duration_ms = ms;
        self
    }

    /// Set the per-match score bonus.
    #[must_use]
    pub fn with_match_bonus(mut self, bonus: u32) -> Self {
        self.match_bonus = bonus;
        self
    }

    /// Set the power-up grants handed out at session start.
    #[must_use]
    pub fn with_grants(mut self, shuffle: u8, hint: u8, slow_time: u8) -> Self {
        self.shuffle_grants = shuffle;
        self.hint_grants = hint;
        self.slow_time_grants = slow_time;
        self
    }

    /// The power-up counters a fresh session starts with.
    #[must_use]
    pub fn grants(&self) -> PowerUpCounts {
        PowerUpCounts {
            shuffle: self.shuffle_grants,
            hint: self.hint_grants,
            slow_time: self.slow_time_grants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ruleset() {
        let rules = Ruleset::default();

        assert_eq!(rules.match_bonus, 10);
        assert_eq!(rules.match_time_bonus, 5);
        assert_eq!(rules.mismatch_penalty, 2);
        assert_eq!(rules.mismatch_time_floor, 1);
        assert_eq!(rules.mismatch_delay_ms, 1_000);
        assert_eq!(rules.hint_duration_ms, 3_000);
        assert_eq!(rules.slow_time_bonus, 10);
    }

    #[test]
    fn test_default_grants() {
        let grants = Ruleset::default().grants();

        assert_eq!(grants.shuffle, 1);
        assert_eq!(grants.hint, 2);
        assert_eq!(grants.slow_time, 1);
    }

    #[test]
    fn test_builder() {
        let rules = Ruleset::new()
            .with_mismatch_delay_ms(500)
            .with_hint_duration_ms(1_000)
            .with_match_bonus(25)
            .with_grants(2, 0, 3);

        assert_eq!(rules.mismatch_delay_ms, 500);
        assert_eq!(rules.hint_duration_ms, 1_000);
        assert_eq!(rules.match_bonus, 25);
        assert_eq!(rules.grants().shuffle, 2);
        assert_eq!(rules.grants().hint, 0);
        assert_eq!(rules.grants().slow_time, 3);
    }
}
