//! Centralized error types for the board.
//!
//! Board and drag operations never fail; these only surface at the
//! configuration and script boundaries.

use thiserror::Error;

/// Main error type for kanban operations.
#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script error at step {step}: {message}")]
    Script { step: usize, message: String },
}

/// Result type for kanban operations.
pub type KanbanResult<T> = Result<T, KanbanError>;

impl KanbanError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a script error for the given (1-based) step.
    pub fn script(step: usize, msg: impl Into<String>) -> Self {
        Self::Script {
            step,
            message: msg.into(),
        }
    }
}
