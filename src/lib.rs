//! # flipmatch
//!
//! A timed memory-matching card game engine.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: Board generation, the flip/match protocol, the
//!    timer/score model, and power-up effects. Rendering, animation,
//!    and input are external collaborators that observe snapshots and
//!    emit intents.
//!
//! 2. **Intents In, Snapshots Out**: The presentation layer dispatches
//!    `Intent` values and re-reads a `GameSnapshot` after every
//!    transition. Invalid intents are silent no-ops, never errors, so
//!    UIs can send them speculatively.
//!
//! 3. **Deterministic Time and Randomness**: No wall clock and no
//!    global RNG. The host pushes elapsed milliseconds through
//!    `GameEngine::advance`, and all randomness flows from a seeded,
//!    forkable `GameRng`, so every game is replayable.
//!
//! 4. **Epoch-Bound Callbacks**: Delayed transitions (mismatch
//!    reversion, hint expiry) are scheduled, cancellable timers bound
//!    to a session epoch. A timer outliving its session becomes a
//!    no-op instead of corrupting the next game.
//!
//! ## Modules
//!
//! - `core`: Cards, difficulty, session state, intents, RNG, rules
//! - `cards`: Card templates and the pool boards are drawn from
//! - `board`: Deck generation (uniform draws, Fisher-Yates shuffle)
//! - `clock`: Virtual-time scheduler (countdown cadence, one-shots)
//! - `powerups`: Shuffle, hint, and slow-time effects
//! - `engine`: The state machine and observable snapshots
//!
//! ## Example
//!
//! ```
//! use flipmatch::{Difficulty, GameEngine, Phase};
//!
//! let mut engine = GameEngine::new(42);
//! engine.start(Difficulty::easy())?;
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.phase, Phase::Playing);
//! assert_eq!(snapshot.deck.len(), 12);
//! assert_eq!(snapshot.time_left, 60);
//!
//! // One second of virtual time passes
//! engine.advance(1_000);
//! assert_eq!(engine.snapshot().time_left, 59);
//! # Ok::<(), flipmatch::EngineError>(())
//! ```

pub mod board;
pub mod cards;
pub mod clock;
pub mod core;
pub mod engine;
pub mod error;
pub mod powerups;

// Re-export commonly used types
pub use crate::core::{
    Card, CardColor, CardId, FaceState, Flavor, Suit,
    Difficulty, Ruleset,
    GameRng, GameRngState,
    Intent, PowerUpKind,
    Phase, PowerUpCounts, Session, TransitionKind, TransitionRecord,
};

pub use crate::cards::{CardTemplate, TemplatePool};

pub use crate::clock::{Scheduler, TimerFire, TimerKind, COUNTDOWN_PERIOD_MS};

pub use crate::engine::{GameEngine, GameSnapshot};

pub use crate::error::EngineError;

pub use crate::powerups::{PowerUpController, PowerUpOutcome};
