//! Virtual-time scheduler.
//!
//! The engine never reads a wall clock. The host (or a test) pushes
//! elapsed milliseconds through `advance`, and the scheduler returns
//! the timers that came due, in strict chronological order.
//!
//! Two timer families exist:
//!
//! - the countdown cadence: one `CountdownTick` per second while armed;
//! - one-shots: the mismatch reveal window and the hint expiry.
//!
//! Every timer carries the epoch of the session that scheduled it. On
//! restart, return-to-menu, or terminal-phase entry the engine bumps
//! its epoch and calls `cancel_stale`, so callbacks belonging to a dead
//! session can never fire into a new one. The engine additionally
//! re-checks the epoch on every fire.
//!
//! Ties at the same virtual millisecond resolve by schedule order
//! (ascending `seq`); the countdown keeps the `seq` it was armed with,
//! so a tick fires before any one-shot scheduled after the countdown
//! started.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Countdown cadence: one tick per second of virtual time.
pub const COUNTDOWN_PERIOD_MS: u64 = 1_000;

/// What a due timer asks the engine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Decrement the countdown by one second.
    CountdownTick,
    /// Revert a pending mismatched pair to face-down.
    MismatchRevert,
    /// Clear the hint highlight, if it still points at this card.
    HintExpiry { card: CardId },
}

/// A timer that has come due.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerFire {
    /// What to do.
    pub kind: TimerKind,
    /// Epoch of the session that scheduled it.
    pub epoch: u64,
    /// Virtual time at which it fired.
    pub at_ms: u64,
}

#[derive(Clone, Debug)]
struct OneShot {
    due_ms: u64,
    seq: u64,
    epoch: u64,
    kind: TimerKind,
}

#[derive(Clone, Debug)]
struct Countdown {
    next_due_ms: u64,
    seq: u64,
    epoch: u64,
}

/// Deterministic millisecond scheduler.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    one_shots: Vec<OneShot>,
    countdown: Option<Countdown>,
}

impl Scheduler {
    /// Create an idle scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a one-shot timer `delay_ms` from now, bound to `epoch`.
    pub fn schedule(&mut self, delay_ms: u64, kind: TimerKind, epoch: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.one_shots.push(OneShot {
            due_ms: self.now_ms + delay_ms,
            seq,
            epoch,
            kind,
        });
    }

    /// Arm (or re-arm) the countdown cadence for `epoch`.
    ///
    /// The first tick fires one period from now.
    pub fn start_countdown(&mut self, epoch: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.countdown = Some(Countdown {
            next_due_ms: self.now_ms + COUNTDOWN_PERIOD_MS,
            seq,
            epoch,
        });
    }

    /// Disarm the countdown cadence.
    pub fn stop_countdown(&mut self) {
        self.countdown = None;
    }

    /// Is the countdown armed?
    #[must_use]
    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    /// Number of pending one-shots.
    #[must_use]
    pub fn pending_one_shots(&self) -> usize {
        self.one_shots.len()
    }

    /// Drop everything not belonging to `current_epoch`.
    ///
    /// One-shots from prior epochs are removed; a countdown armed by a
    /// prior epoch is disarmed.
    pub fn cancel_stale(&mut self, current_epoch: u64) {
        self.one_shots.retain(|t| t.epoch == current_epoch);
        if let Some(c) = &self.countdown {
            if c.epoch != current_epoch {
                self.countdown = None;
            }
        }
    }

    /// Advance virtual time, returning every timer that came due, in
    /// chronological order with ties broken by schedule order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerFire> {
        enum Due {
            Shot(usize),
            Tick,
        }

        let target = self.now_ms + elapsed_ms;
        let mut fires = Vec::new();

        loop {
            let best_shot = self
                .one_shots
                .iter()
                .enumerate()
                .map(|(i, t)| (i, (t.due_ms, t.seq)))
                .min_by_key(|&(_, key)| key);
            let tick_key = self.countdown.as_ref().map(|c| (c.next_due_ms, c.seq));

            let due = match (best_shot, tick_key) {
                (Some((i, key)), None) if key.0 <= target => Due::Shot(i),
                (None, Some(key)) if key.0 <= target => Due::Tick,
                (Some((i, shot_key)), Some(tick)) if shot_key.min(tick).0 <= target => {
                    if shot_key < tick {
                        Due::Shot(i)
                    } else {
                        Due::Tick
                    }
                }
                _ => break,
            };

            match due {
                Due::Shot(idx) => {
                    let shot = self.one_shots.swap_remove(idx);
                    self.now_ms = shot.due_ms;
                    fires.push(TimerFire {
                        kind: shot.kind,
                        epoch: shot.epoch,
                        at_ms: shot.due_ms,
                    });
                }
                Due::Tick => {
                    if let Some(c) = self.countdown.as_mut() {
                        let at_ms = c.next_due_ms;
                        c.next_due_ms += COUNTDOWN_PERIOD_MS;
                        let epoch = c.epoch;
                        self.now_ms = at_ms;
                        fires.push(TimerFire {
                            kind: TimerKind::CountdownTick,
                            epoch,
                            at_ms,
                        });
                    }
                }
            }
        }

        self.now_ms = target;
        fires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_advance_fires_nothing() {
        let mut sched = Scheduler::new();
        assert!(sched.advance(5_000).is_empty());
        assert_eq!(sched.now_ms(), 5_000);
    }

    #[test]
    fn test_countdown_ticks_once_per_second() {
        let mut sched = Scheduler::new();
        sched.start_countdown(1);

        let fires = sched.advance(3_500);

        assert_eq!(fires.len(), 3);
        assert!(fires.iter().all(|f| f.kind == TimerKind::CountdownTick));
        assert_eq!(
            fires.iter().map(|f| f.at_ms).collect::<Vec<_>>(),
            vec![1_000, 2_000, 3_000]
        );

        // The half-second remainder carries over
        let fires = sched.advance(500);
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].at_ms, 4_000);
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut sched = Scheduler::new();
        sched.schedule(1_000, TimerKind::MismatchRevert, 1);

        assert!(sched.advance(999).is_empty());

        let fires = sched.advance(1);
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].kind, TimerKind::MismatchRevert);
        assert_eq!(fires[0].at_ms, 1_000);

        assert!(sched.advance(10_000).is_empty());
    }

    #[test]
    fn test_chronological_interleaving() {
        let mut sched = Scheduler::new();
        sched.start_countdown(1);
        sched.advance(500);
        sched.schedule(1_000, TimerKind::MismatchRevert, 1); // due 1500

        let fires = sched.advance(2_000); // ticks at 1000, 2000; revert at 1500

        let kinds: Vec<_> = fires.iter().map(|f| (f.at_ms, f.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (1_000, TimerKind::CountdownTick),
                (1_500, TimerKind::MismatchRevert),
                (2_000, TimerKind::CountdownTick),
            ]
        );
    }

    #[test]
    fn test_tie_resolves_by_schedule_order() {
        let mut sched = Scheduler::new();
        sched.start_countdown(1); // armed first, ticks at 1000
        sched.schedule(1_000, TimerKind::MismatchRevert, 1); // also due 1000

        let fires = sched.advance(1_000);

        assert_eq!(fires.len(), 2);
        assert_eq!(fires[0].kind, TimerKind::CountdownTick);
        assert_eq!(fires[1].kind, TimerKind::MismatchRevert);
    }

    #[test]
    fn test_cancel_stale_drops_old_epochs() {
        let mut sched = Scheduler::new();
        sched.start_countdown(1);
        sched.schedule(1_000, TimerKind::MismatchRevert, 1);
        sched.schedule(
            3_000,
            TimerKind::HintExpiry {
                card: CardId::new(4),
            },
            2,
        );

        sched.cancel_stale(2);

        assert!(!sched.countdown_running());
        assert_eq!(sched.pending_one_shots(), 1);

        let fires = sched.advance(5_000);
        assert_eq!(fires.len(), 1);
        assert_eq!(
            fires[0].kind,
            TimerKind::HintExpiry {
                card: CardId::new(4)
            }
        );
    }

    #[test]
    fn test_stop_countdown() {
        let mut sched = Scheduler::new();
        sched.start_countdown(1);
        sched.advance(1_000);
        sched.stop_countdown();

        assert!(sched.advance(10_000).is_empty());
    }

    #[test]
    fn test_rearm_restarts_cadence() {
        let mut sched = Scheduler::new();
        sched.start_countdown(1);
        sched.advance(2_400); // ticks at 1000, 2000

        sched.start_countdown(2); // re-armed at 2400

        let fires = sched.advance(1_000);
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].at_ms, 3_400);
        assert_eq!(fires[0].epoch, 2);
    }
}
