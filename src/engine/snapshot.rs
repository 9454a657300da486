//! Read-only state snapshots for the presentation layer.
//!
//! After every dispatched intent or `advance` call, the presentation
//! layer re-reads a `GameSnapshot`. Snapshots are plain values: cloning
//! one never aliases engine state, and they serialize for UIs that live
//! across a process boundary.

use serde::{Deserialize, Serialize};

use crate::core::{Card, CardId, Phase, PowerUpCounts, Session};

/// Observable state for one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The full deck in board order. Empty before the first start.
    pub deck: Vec<Card>,

    /// IDs of the cards currently face-up awaiting resolution (≤ 2).
    pub face_up: Vec<CardId>,

    /// Card highlighted by an active hint, if any.
    pub hinted: Option<CardId>,

    /// Current score.
    pub score: u32,

    /// Countdown seconds remaining.
    pub time_left: u32,

    /// Pairs matched so far.
    pub matched_pairs: usize,

    /// Total pairs on the board (0 before the first start).
    pub pairs_total: usize,

    /// Remaining power-up uses.
    pub power_ups: PowerUpCounts,

    /// Lifecycle phase.
    pub phase: Phase,
}

impl GameSnapshot {
    /// Snapshot of an engine with no session (menu screen).
    #[must_use]
    pub fn not_started() -> Self {
        Self {
            deck: Vec::new(),
            face_up: Vec::new(),
            hinted: None,
            score: 0,
            time_left: 0,
            matched_pairs: 0,
            pairs_total: 0,
            power_ups: PowerUpCounts {
                shuffle: 0,
                hint: 0,
                slow_time: 0,
            },
            phase: Phase::NotStarted,
        }
    }

    /// Snapshot a live session.
    #[must_use]
    pub fn of_session(session: &Session) -> Self {
        Self {
            deck: session.deck.clone(),
            face_up: session.face_up.to_vec(),
            hinted: session.hinted,
            score: session.score,
            time_left: session.time_left,
            matched_pairs: session.matched_pairs,
            pairs_total: session.difficulty.pairs,
            power_ups: session.power_ups,
            phase: session.phase,
        }
    }

    /// Is the board accepting flips (modulo the face-up window)?
    #[must_use]
    pub fn playable(&self) -> bool {
        self.phase.is_playing()
    }
}
