//! Core engine types: RNG, configuration, errors.
//!
//! These are shared by every other module and carry no game rules of their own.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, DEFAULT_SESSION_SECONDS, DEFAULT_UNLOCK_SECRET, DEFAULT_WIN_VALUE};
pub use error::EngineError;
pub use rng::{GameRng, GameRngState, TileRng};
