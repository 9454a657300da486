//! Engine error types.
//!
//! Invalid gameplay intents (flipping a matched card, spending an empty
//! power-up, acting outside `Playing`) are silent no-ops by contract, so
//! the error surface is small: the only recoverable failure is a board
//! configuration that cannot be generated.

use thiserror::Error;

/// Errors reported by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested board cannot be built from the template pool.
    ///
    /// Raised by `start`/`restart` when a difficulty asks for more pairs
    /// than the pool can supply, or for zero pairs.
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable description of the misconfiguration.
        message: String,
    },
}

impl EngineError {
    /// Build a configuration error from any displayable message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = EngineError::configuration("pool too small");
        assert_eq!(format!("{}", err), "configuration error: pool too small");
    }
}
