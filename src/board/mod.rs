//! Board generation: difficulty + template pool + RNG -> shuffled deck.

pub mod generator;

pub use generator::generate;
