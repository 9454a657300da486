//! Power-up effects.
//!
//! Three limited-use effects mutate the session outside the normal flip
//! protocol. Each is gated on `Playing` and a positive counter, and the
//! counter decrement is applied in the same transition as the effect;
//! there is no observable state where one happened without the other.
//!
//! The controller holds no state of its own; it operates on the session
//! handed to it by the engine, which remains the session's only owner.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Card, CardId, PowerUpKind, Ruleset, Session};

/// Outcome of a power-up request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpOutcome {
    /// Counter consumed and effect applied.
    ///
    /// For `Hint`, `hinted` carries the highlighted card, or `None` when
    /// no intact face-down pair existed (the counter is still spent).
    Applied { hinted: Option<CardId> },
    /// Wrong phase or spent counter; nothing changed.
    Rejected,
}

/// Applies power-up effects against a session.
#[derive(Clone, Copy, Debug, Default)]
pub struct PowerUpController;

impl PowerUpController {
    /// Spend one use of `kind` and apply its effect.
    ///
    /// Rejected (and the counter untouched) unless the session is in
    /// `Playing` and the counter is positive.
    pub fn apply(&self, kind: PowerUpKind, rules: &Ruleset, session: &mut Session) -> PowerUpOutcome {
        if !session.phase.is_playing() {
            trace!(%kind, phase = ?session.phase, "power-up rejected: not playing");
            return PowerUpOutcome::Rejected;
        }
        if session.power_ups.remaining(kind) == 0 {
            trace!(%kind, "power-up rejected: counter spent");
            return PowerUpOutcome::Rejected;
        }

        *session.power_ups.counter_mut(kind) -= 1;

        let hinted = match kind {
            PowerUpKind::Shuffle => {
                Self::shuffle_face_down(session);
                None
            }
            PowerUpKind::Hint => {
                let pick = Self::pick_hint(session);
                session.hinted = pick.or(session.hinted);
                pick
            }
            PowerUpKind::SlowTime => {
                session.time_left += rules.slow_time_bonus;
                None
            }
        };

        debug!(%kind, remaining = session.power_ups.remaining(kind), "power-up applied");
        PowerUpOutcome::Applied { hinted }
    }

    /// Permute the cards occupying face-down positions, uniformly.
    ///
    /// Positions of `Matched` and `FaceUp` cards are untouched.
    fn shuffle_face_down(session: &mut Session) {
        let positions: Vec<usize> = session
            .deck
            .iter()
            .enumerate()
            .filter(|(_, c)| c.face.is_face_down())
            .map(|(i, _)| i)
            .collect();

        if positions.len() < 2 {
            return;
        }

        let mut cards: Vec<Card> = positions.iter().map(|&i| session.deck[i].clone()).collect();
        session.rng.shuffle(&mut cards);
        for (&pos, card) in positions.iter().zip(cards) {
            session.deck[pos] = card;
        }
    }

    /// Pick one member of an intact, unrevealed pair.
    ///
    /// A pair qualifies only when both of its cards are face-down.
    /// Uniform over qualifying pairs, then uniform over the two members.
    /// Returns `None` when no pair qualifies.
    fn pick_hint(session: &mut Session) -> Option<CardId> {
        let mut by_name: FxHashMap<&str, SmallVec<[CardId; 2]>> = FxHashMap::default();
        for card in &session.deck {
            if card.face.is_face_down() {
                by_name.entry(card.name.as_str()).or_default().push(card.id);
            }
        }

        let mut intact: Vec<[CardId; 2]> = by_name
            .values()
            .filter(|ids| ids.len() == 2)
            .map(|ids| [ids[0], ids[1]])
            .collect();
        // Hash order varies with the key set; sort so the uniform draw
        // is reproducible for a given seed.
        intact.sort_by_key(|pair| pair[0].raw());

        let pair = *session.rng.choose(&intact)?;
        let member = session.rng.gen_range_usize(0..2);
        Some(pair[member])
    }
}
