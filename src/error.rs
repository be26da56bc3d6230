//! Error types for the duel engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Action is legal in shape but illegal for the current state
    /// (wrong phase, wrong player, bad slot). State is left untouched.
    #[error("Illegal action: {0}")]
    Validation(String),

    /// Action is malformed regardless of state (player index out of
    /// range, impossible position). Caught before any mutation.
    #[error("Malformed action: {0}")]
    Structural(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
