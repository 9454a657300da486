//! The game state machine.
//!
//! `GameEngine` exclusively owns the session and is the single entry
//! point for every transition: presentation intents, countdown ticks,
//! and due one-shot timers all land here. The board generator, power-up
//! controller and scheduler are collaborators; none of them holds or
//! mutates the session on its own.
//!
//! ## Epochs
//!
//! Every scheduled callback carries the epoch of the session that
//! created it. Restart, return-to-menu, and terminal-phase entry bump
//! the epoch and cancel stale timers, so a delayed mismatch reversion
//! or hint expiry from a dead session can never corrupt a newer one.
//! Fires are re-checked against the current epoch as a second guard:
//! within one `advance` batch, a tick that loses the game staleness
//! all later fires of the same batch.
//!
//! ## No-op contract
//!
//! Invalid intents are silent no-ops, never errors, because presentation
//! layers send intents speculatively. The only real failure is a
//! board configuration the generator rejects.

use tracing::{debug, trace};

use crate::board;
use crate::cards::TemplatePool;
use crate::clock::{Scheduler, TimerFire, TimerKind};
use crate::core::{
    CardId, Difficulty, FaceState, GameRng, Intent, Phase, PowerUpKind, Ruleset, Session,
    TransitionKind,
};
use crate::engine::snapshot::GameSnapshot;
use crate::error::EngineError;
use crate::powerups::{PowerUpController, PowerUpOutcome};

/// Owns and advances one game at a time.
#[derive(Clone, Debug)]
pub struct GameEngine {
    rules: Ruleset,
    pool: TemplatePool,
    rng: GameRng,
    scheduler: Scheduler,
    powerups: PowerUpController,
    session: Option<Session>,
    epoch: u64,
}

impl GameEngine {
    /// Create an engine with the standard ruleset and built-in pool.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_parts(Ruleset::default(), TemplatePool::default_pool(), GameRng::new(seed))
    }

    /// Create an engine from explicit parts.
    #[must_use]
    pub fn with_parts(rules: Ruleset, pool: TemplatePool, rng: GameRng) -> Self {
        Self {
            rules,
            pool,
            rng,
            scheduler: Scheduler::new(),
            powerups: PowerUpController,
            session: None,
            epoch: 0,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::NotStarted, |s| s.phase)
    }

    /// The current session, if one exists.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current session epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// The engine's ruleset.
    #[must_use]
    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    /// Snapshot the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.session
            .as_ref()
            .map_or_else(GameSnapshot::not_started, GameSnapshot::of_session)
    }

    /// Dispatch a presentation-layer intent.
    pub fn handle(&mut self, intent: Intent) -> Result<(), EngineError> {
        match intent {
            Intent::StartGame(difficulty) => self.start(difficulty),
            Intent::FlipCard(id) => {
                self.flip(id);
                Ok(())
            }
            Intent::UsePowerUp(kind) => {
                self.use_power_up(kind);
                Ok(())
            }
            Intent::Restart => self.restart(),
            Intent::ReturnToMenu => {
                self.return_to_menu();
                Ok(())
            }
        }
    }

    /// Begin a session at the given difficulty.
    ///
    /// Valid from `NotStarted` and the terminal phases; a start while
    /// `Playing` is a silent no-op.
    ///
    /// ## Errors
    ///
    /// `EngineError::Configuration` when the board cannot be generated.
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), EngineError> {
        if self.phase().is_playing() {
            trace!("start ignored: session already playing");
            return Ok(());
        }
        self.begin_session(difficulty)
    }

    /// Discard the session and regenerate a board at the same
    /// difficulty. No-op without a session.
    ///
    /// ## Errors
    ///
    /// `EngineError::Configuration` when the board cannot be generated.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let Some(difficulty) = self.session.as_ref().map(|s| s.difficulty.clone()) else {
            trace!("restart ignored: no session");
            return Ok(());
        };
        self.begin_session(difficulty)
    }

    /// Discard the session and return to `NotStarted` with no board.
    pub fn return_to_menu(&mut self) {
        self.epoch += 1;
        self.scheduler.cancel_stale(self.epoch);
        self.session = None;
        debug!(epoch = self.epoch, "returned to menu");
    }

    /// Flip a card.
    ///
    /// No-op unless the session is `Playing`, the face-up window has
    /// room, the ID names a real card, and that card is face-down.
    /// Filling the window resolves it immediately.
    pub fn flip(&mut self, id: CardId) {
        let now = self.scheduler.now_ms();
        let window_full = {
            let Some(session) = self.session.as_mut() else { return };
            if !session.phase.is_playing() {
                trace!(%id, "flip ignored: not playing");
                return;
            }
            if session.face_up_full() {
                trace!(%id, "flip ignored: window full");
                return;
            }
            let Some(card) = session.card_mut(id) else {
                trace!(%id, "flip ignored: unknown card");
                return;
            };
            if !card.face.is_face_down() {
                trace!(%id, face = ?card.face, "flip ignored: not face-down");
                return;
            }
            card.face = FaceState::FaceUp;
            session.face_up.push(id);
            session.record(now, TransitionKind::Flipped(id));
            session.face_up_full()
        };
        if window_full {
            self.resolve_window();
        }
    }

    /// Spend one use of a power-up. No-op outside `Playing` or with a
    /// spent counter.
    pub fn use_power_up(&mut self, kind: PowerUpKind) {
        let now = self.scheduler.now_ms();
        let outcome = {
            let Some(session) = self.session.as_mut() else { return };
            let outcome = self.powerups.apply(kind, &self.rules, session);
            if matches!(outcome, PowerUpOutcome::Applied { .. }) {
                session.record(now, TransitionKind::PowerUp(kind));
            }
            outcome
        };
        if let PowerUpOutcome::Applied { hinted: Some(card) } = outcome {
            self.scheduler
                .schedule(self.rules.hint_duration_ms, TimerKind::HintExpiry { card }, self.epoch);
        }
    }

    /// Advance virtual time, applying every timer that comes due in
    /// chronological order.
    pub fn advance(&mut self, elapsed_ms: u64) {
        for fire in self.scheduler.advance(elapsed_ms) {
            self.apply_timer(fire);
        }
    }

    fn apply_timer(&mut self, fire: TimerFire) {
        if fire.epoch != self.epoch {
            trace!(at_ms = fire.at_ms, fire_epoch = fire.epoch, "stale timer ignored");
            return;
        }
        match fire.kind {
            TimerKind::CountdownTick => self.tick(fire.at_ms),
            TimerKind::MismatchRevert => self.revert_mismatch(fire.at_ms),
            TimerKind::HintExpiry { card } => self.expire_hint(card, fire.at_ms),
        }
    }

    /// One second of countdown.
    fn tick(&mut self, at_ms: u64) {
        let lost = {
            let Some(session) = self.session.as_mut() else { return };
            if !session.phase.is_playing() {
                return;
            }
            session.time_left = session.time_left.saturating_sub(1);
            session.record(at_ms, TransitionKind::Tick);
            session.time_left == 0
        };
        if lost {
            self.finish(Phase::Lost);
        }
    }

    /// End of the mismatch reveal window.
    fn revert_mismatch(&mut self, at_ms: u64) {
        let penalty = self.rules.mismatch_penalty;
        let floor = self.rules.mismatch_time_floor;
        let Some(session) = self.session.as_mut() else { return };
        if !session.phase.is_playing() {
            return;
        }
        let ids = std::mem::take(&mut session.face_up);
        for id in ids {
            if let Some(card) = session.card_mut(id) {
                if card.face == FaceState::FaceUp {
                    card.face = FaceState::FaceDown;
                }
            }
        }
        session.time_left = session.time_left.saturating_sub(penalty).max(floor);
        session.record(at_ms, TransitionKind::MismatchReverted);
        trace!(time_left = session.time_left, "mismatch reverted");
    }

    /// End of a hint highlight, unless a newer hint superseded it.
    fn expire_hint(&mut self, card: CardId, at_ms: u64) {
        let Some(session) = self.session.as_mut() else { return };
        if session.hinted == Some(card) {
            session.hinted = None;
            session.record(at_ms, TransitionKind::HintExpired);
        }
    }

    /// Resolve a full face-up window: match or schedule a reversion.
    fn resolve_window(&mut self) {
        let now = self.scheduler.now_ms();
        let epoch = self.epoch;
        let mismatch_delay = self.rules.mismatch_delay_ms;
        let match_bonus = self.rules.match_bonus;
        let match_time_bonus = self.rules.match_time_bonus;

        let (won, mismatched) = {
            let Some(session) = self.session.as_mut() else { return };
            if session.face_up.len() != 2 {
                return;
            }
            let (a, b) = (session.face_up[0], session.face_up[1]);
            // Window ids are bound-checked before indexing the deck.
            let (Some(name_a), Some(name_b)) = (
                session.card(a).map(|c| c.name.clone()),
                session.card(b).map(|c| c.name.clone()),
            ) else {
                session.face_up.clear();
                return;
            };

            if name_a == name_b {
                for id in [a, b] {
                    if let Some(card) = session.card_mut(id) {
                        card.face = FaceState::Matched;
                    }
                }
                session.face_up.clear();
                session.score += match_bonus;
                session.matched_pairs += 1;
                session.time_left += match_time_bonus;
                session.record(now, TransitionKind::Matched { name: name_a.clone() });
                debug!(
                    name = %name_a,
                    score = session.score,
                    matched = session.matched_pairs,
                    "pair matched"
                );
                (session.matched_pairs == session.difficulty.pairs, false)
            } else {
                session.record(now, TransitionKind::MismatchScheduled);
                debug!(a = %a, b = %b, "mismatch, reversion scheduled");
                (false, true)
            }
        };

        if won {
            self.finish(Phase::Won);
        } else if mismatched {
            self.scheduler
                .schedule(mismatch_delay, TimerKind::MismatchRevert, epoch);
        }
    }

    /// Enter a terminal phase: stop the countdown, invalidate every
    /// pending callback, clear the hint highlight.
    fn finish(&mut self, outcome: Phase) {
        debug_assert!(outcome.is_terminal());
        let now = self.scheduler.now_ms();
        {
            let Some(session) = self.session.as_mut() else { return };
            session.phase = outcome;
            session.hinted = None;
            session.record(
                now,
                if outcome == Phase::Won {
                    TransitionKind::Won
                } else {
                    TransitionKind::Lost
                },
            );
            debug!(
                ?outcome,
                score = session.score,
                time_left = session.time_left,
                "session finished"
            );
        }
        self.epoch += 1;
        self.scheduler.cancel_stale(self.epoch);
    }

    /// Replace the session wholesale with a freshly generated board.
    fn begin_session(&mut self, difficulty: Difficulty) -> Result<(), EngineError> {
        // Generate before touching anything: a failed start must leave
        // the prior state intact.
        let mut session_rng = self.rng.fork();
        let deck = board::generate(&difficulty, &self.pool, &mut session_rng)?;

        self.epoch += 1;
        self.scheduler.cancel_stale(self.epoch);

        let mut session = Session::new(difficulty, deck, self.rules.grants(), session_rng);
        session.record(self.scheduler.now_ms(), TransitionKind::Started);
        debug!(difficulty = %session.difficulty, epoch = self.epoch, "session started");
        self.session = Some(session);
        self.scheduler.start_countdown(self.epoch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_is_not_started() {
        let engine = GameEngine::new(42);

        assert_eq!(engine.phase(), Phase::NotStarted);
        assert!(engine.session().is_none());
        assert_eq!(engine.snapshot().phase, Phase::NotStarted);
    }

    #[test]
    fn test_start_creates_playing_session() {
        let mut engine = GameEngine::new(42);
        engine.start(Difficulty::easy()).unwrap();

        assert_eq!(engine.phase(), Phase::Playing);
        let snap = engine.snapshot();
        assert_eq!(snap.deck.len(), 12);
        assert_eq!(snap.time_left, 60);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.power_ups.shuffle, 1);
        assert_eq!(snap.power_ups.hint, 2);
        assert_eq!(snap.power_ups.slow_time, 1);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut engine = GameEngine::new(42);
        engine.start(Difficulty::easy()).unwrap();
        let deck_before = engine.snapshot().deck;

        engine.start(Difficulty::hard()).unwrap();

        assert_eq!(engine.snapshot().deck, deck_before);
        assert_eq!(engine.snapshot().pairs_total, 6);
    }

    #[test]
    fn test_start_propagates_configuration_error() {
        let mut engine = GameEngine::new(42);
        let oversized = Difficulty::custom("huge", 99, 60);

        let err = engine.start(oversized).unwrap_err();

        assert!(matches!(err, EngineError::Configuration { .. }));
        assert_eq!(engine.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_flip_before_start_is_noop() {
        let mut engine = GameEngine::new(42);
        engine.flip(CardId::new(0));

        assert_eq!(engine.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_flip_unknown_id_is_noop() {
        let mut engine = GameEngine::new(42);
        engine.start(Difficulty::easy()).unwrap();

        engine.flip(CardId::new(999));

        assert!(engine.snapshot().face_up.is_empty());
    }

    #[test]
    fn test_restart_without_session_is_noop() {
        let mut engine = GameEngine::new(42);
        engine.restart().unwrap();

        assert_eq!(engine.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_restart_replaces_session_and_epoch() {
        let mut engine = GameEngine::new(42);
        engine.start(Difficulty::easy()).unwrap();
        let epoch_before = engine.epoch();
        let deck_before = engine.snapshot().deck;

        engine.restart().unwrap();

        assert_eq!(engine.phase(), Phase::Playing);
        assert!(engine.epoch() > epoch_before);
        // A fresh fork makes a different board overwhelmingly likely
        assert_ne!(engine.snapshot().deck, deck_before);
    }

    #[test]
    fn test_return_to_menu_discards_session() {
        let mut engine = GameEngine::new(42);
        engine.start(Difficulty::easy()).unwrap();

        engine.return_to_menu();

        assert_eq!(engine.phase(), Phase::NotStarted);
        assert!(engine.session().is_none());

        // The countdown is gone: advancing does nothing
        engine.advance(10_000);
        assert_eq!(engine.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_handle_dispatches_intents() {
        let mut engine = GameEngine::new(42);

        engine.handle(Intent::StartGame(Difficulty::easy())).unwrap();
        assert_eq!(engine.phase(), Phase::Playing);

        engine.handle(Intent::ReturnToMenu).unwrap();
        assert_eq!(engine.phase(), Phase::NotStarted);
    }
}
