//! Virtual clock: countdown cadence and epoch-tagged one-shot timers.

pub mod scheduler;

pub use scheduler::{Scheduler, TimerFire, TimerKind, COUNTDOWN_PERIOD_MS};
