//! Errors reported by the engine's public parsing and unlock APIs.
//!
//! None of these are fatal: the controller swallows invalid input and the
//! caller decides how to present an unlock rejection.

use thiserror::Error;

/// Errors surfaced by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid code, scan the correct code to unlock the game")]
    UnlockMismatch,
}

pub type Result<T> = std::result::Result<T, EngineError>;
