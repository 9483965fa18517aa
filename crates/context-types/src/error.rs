//! Error types for context index resolution.

use thiserror::Error;

/// Errors raised by host collaborators or by settings loading.
#[derive(Debug, Error)]
pub enum ContextIndexError {
    /// The host item layer cannot produce the item in its current state.
    ///
    /// Raised when an indexable is excluded everywhere and has no
    /// path-bearing representation that any index could own.
    #[error("Invalid item state: {0}")]
    InvalidState(String),

    /// Any other failure reported by a host collaborator
    #[error("Host error: {0}")]
    Host(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ContextIndexError {
    /// Returns true for the invalid-state fault of the item layer.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, ContextIndexError::InvalidState(_))
    }
}

impl From<config::ConfigError> for ContextIndexError {
    fn from(err: config::ConfigError) -> Self {
        ContextIndexError::Config(err.to_string())
    }
}
