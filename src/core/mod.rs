//! Core engine types: cards, difficulty, session state, intents, RNG, rules.
//!
//! This module contains the building blocks the components above it
//! (board generator, state machine, power-up controller, clock) operate
//! on. Nothing here schedules or mutates on its own.

pub mod card;
pub mod config;
pub mod difficulty;
pub mod intent;
pub mod rng;
pub mod session;

pub use card::{Card, CardColor, CardId, FaceState, Flavor, Suit};
pub use config::Ruleset;
pub use difficulty::Difficulty;
pub use intent::{Intent, PowerUpKind};
pub use rng::{GameRng, GameRngState};
pub use session::{Phase, PowerUpCounts, Session, TransitionKind, TransitionRecord};
