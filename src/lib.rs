//! # tile256
//!
//! Engine for a timed sliding-tile puzzle: reach a 256 tile before the clock
//! runs out. Play is gated behind a scan-to-unlock step.
//!
//! ## Design Principles
//!
//! 1. **Pure Core**: Sliding and merging are pure functions of the board.
//!    Rendering, camera access and storage are the host's concern.
//!
//! 2. **Injectable Randomness**: Tile spawning draws from a `TileRng`, so every
//!    game is reproducible from a seed.
//!
//! 3. **Explicit State**: One `Session` value holds everything; the controller
//!    applies one event at a time and persists the result.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `board`: Grid, rotations, slide/merge, tile spawning
//! - `clock`: Countdown reducer and cancelable tick schedule
//! - `session`: Session aggregate and key-value persistence
//! - `input`: Keys, command words and swipes to directions
//! - `controller`: Composes everything behind one event-driven API
//!
//! ## Example
//!
//! ```
//! use tile256::{Direction, GameConfig, GameController, MemoryStore};
//!
//! let mut game = GameController::new(GameConfig::default(), MemoryStore::new());
//! game.handle_scan("256 game unlock").unwrap();
//!
//! let clock = game.start_clock().unwrap();
//! game.handle_move(Direction::Left);
//! game.handle_scheduled_tick(clock);
//!
//! assert_eq!(game.session().time_left_seconds, 299);
//! ```

pub mod board;
pub mod clock;
pub mod controller;
pub mod core;
pub mod input;
pub mod session;

// Re-export commonly used types
pub use crate::core::{EngineError, GameConfig, GameRng, GameRngState, TileRng};

pub use crate::board::{apply_move, Board, Direction, MoveOutcome, TileSpawner};

pub use crate::clock::{ClockState, TickHandle, TickOutcome};

pub use crate::session::{FileStore, KeyValueStore, MemoryStore, Session, SessionStore, StoreError};

pub use crate::controller::{Events, GameController, GameEvent, UnlockGate};

pub use crate::input::swipe_direction;
