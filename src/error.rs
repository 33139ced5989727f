//! Error types for the engine
//!
//! Terminal positions and exhausted time budgets are ordinary outcomes and
//! never show up here.

use thiserror::Error;

/// Errors that can occur in the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Difficulty level outside 1..=4
    #[error("Invalid difficulty level: {level} (must be 1-4)")]
    InvalidDifficulty { level: u8 },

    /// Malformed position supplied by the caller
    #[error("Invalid position: {reason}")]
    InvalidPosition { reason: String },

    /// Move is not legal in the given position
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: String },
}

impl EngineError {
    pub(crate) fn invalid_position(reason: impl Into<String>) -> Self {
        EngineError::InvalidPosition {
            reason: reason.into(),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
