//! Power-up effects: shuffle, hint, slow-time.

pub mod controller;

pub use controller::{PowerUpController, PowerUpOutcome};
