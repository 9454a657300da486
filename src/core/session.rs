//! Session state: the single owned aggregate for one game.
//!
//! ## Session
//!
//! Everything one game needs: the deck, the face-up window, counters,
//! the hint highlight, the phase, and the session's private RNG stream.
//! A session is created on start and discarded wholesale on restart or
//! return-to-menu; nothing persists past it.
//!
//! ## Ownership
//!
//! The session is exclusively owned by `GameEngine`. The board
//! generator, power-up controller and scheduler never hold it; they
//! receive it by reference through the engine's transition entry points.
//!
//! ## History
//!
//! Each applied transition is appended to an ordered log
//! (`im::Vector` for cheap structural-sharing clones), usable for
//! replay and debugging.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, CardId};
use super::difficulty::Difficulty;
use super::intent::PowerUpKind;
use super::rng::GameRng;

/// Session lifecycle phase.
///
/// `NotStarted -> Playing -> {Won, Lost}`; the terminal phases only
/// lead back to `Playing` through an explicit restart, which replaces
/// the session entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl Phase {
    /// Has the session ended?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }

    /// Is the session accepting gameplay transitions?
    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Phase::Playing)
    }
}

/// Remaining power-up uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpCounts {
    pub shuffle: u8,
    pub hint: u8,
    pub slow_time: u8,
}

impl PowerUpCounts {
    /// Remaining uses for a kind.
    #[must_use]
    pub fn remaining(&self, kind: PowerUpKind) -> u8 {
        match kind {
            PowerUpKind::Shuffle => self.shuffle,
            PowerUpKind::Hint => self.hint,
            PowerUpKind::SlowTime => self.slow_time,
        }
    }

    pub(crate) fn counter_mut(&mut self, kind: PowerUpKind) -> &mut u8 {
        match kind {
            PowerUpKind::Shuffle => &mut self.shuffle,
            PowerUpKind::Hint => &mut self.hint,
            PowerUpKind::SlowTime => &mut self.slow_time,
        }
    }
}

/// What a recorded transition did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransitionKind {
    Started,
    Flipped(CardId),
    Matched { name: String },
    MismatchScheduled,
    MismatchReverted,
    Tick,
    PowerUp(PowerUpKind),
    HintExpired,
    Won,
    Lost,
}

/// One entry in the session's ordered transition log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Sequence number within the session (strictly increasing).
    pub seq: u32,

    /// Virtual time at which the transition applied.
    pub at_ms: u64,

    /// What happened.
    pub kind: TransitionKind,
}

/// Complete state for one game.
#[derive(Clone, Debug)]
pub struct Session {
    /// Difficulty chosen at start; immutable for the session.
    pub difficulty: Difficulty,

    /// The full ordered deck, length `2 * difficulty.pairs`.
    pub deck: Vec<Card>,

    /// IDs of the at-most-two face-up cards awaiting resolution.
    pub face_up: SmallVec<[CardId; 2]>,

    /// Pairs matched so far.
    pub matched_pairs: usize,

    /// Current score (monotonically non-decreasing).
    pub score: u32,

    /// Countdown seconds remaining.
    pub time_left: u32,

    /// Remaining power-up uses.
    pub power_ups: PowerUpCounts,

    /// Card currently highlighted by a hint, if any.
    pub hinted: Option<CardId>,

    /// Lifecycle phase.
    pub phase: Phase,

    /// Per-session RNG stream (forked from the engine's master RNG).
    pub rng: GameRng,

    /// Ordered transition log.
    history: Vector<TransitionRecord>,

    /// Next sequence number.
    seq: u32,
}

impl Session {
    /// Create a session in `Playing` with a freshly generated deck.
    #[must_use]
    pub fn new(difficulty: Difficulty, deck: Vec<Card>, grants: PowerUpCounts, rng: GameRng) -> Self {
        let time_left = difficulty.time_limit_secs;
        Self {
            difficulty,
            deck,
            face_up: SmallVec::new(),
            matched_pairs: 0,
            score: 0,
            time_left,
            power_ups: grants,
            hinted: None,
            phase: Phase::Playing,
            rng,
            history: Vector::new(),
            seq: 0,
        }
    }

    /// Look up a card by ID.
    ///
    /// IDs arrive from the presentation layer, so this is the
    /// bound-checked path; unknown IDs return `None`.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.iter().find(|c| c.id == id)
    }

    /// Look up a card mutably by ID.
    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.deck.iter_mut().find(|c| c.id == id)
    }

    /// Current deck position of a card.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.deck.iter().position(|c| c.id == id)
    }

    /// Is the face-up window full (resolution pending or imminent)?
    #[must_use]
    pub fn face_up_full(&self) -> bool {
        self.face_up.len() >= 2
    }

    /// Append a transition to the log.
    pub fn record(&mut self, at_ms: u64, kind: TransitionKind) {
        let seq = self.seq;
        self.seq += 1;
        self.history.push_back(TransitionRecord { seq, at_ms, kind });
    }

    /// The ordered transition log.
    #[must_use]
    pub fn history(&self) -> &Vector<TransitionRecord> {
        &self.history
    }
}
