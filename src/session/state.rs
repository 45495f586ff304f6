//! The session aggregate.

use serde::{Deserialize, Serialize};

use crate::board::{Board, TileSpawner};
use crate::clock::ClockState;
use crate::core::{GameConfig, TileRng};

/// Complete game state: board, outcome flags, remaining time, unlock status.
///
/// Only the controller mutates a session. `won` and `over` may both be set;
/// once either is, the clock stops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub board: Board,
    pub won: bool,
    pub over: bool,
    pub time_left_seconds: u32,
    pub unlocked: bool,
}

impl Session {
    /// A session around an existing board with the clock at `time_left_seconds`.
    pub fn new(board: Board, time_left_seconds: u32) -> Self {
        Self {
            board,
            won: false,
            over: false,
            time_left_seconds,
            unlocked: false,
        }
    }

    /// A fresh session: two spawned tiles and a full clock.
    pub fn fresh<R: TileRng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let board = TileSpawner::new(config.four_probability).fresh_board(rng);
        Self::new(board, config.session_seconds)
    }

    /// Keep the unlock flag (builder pattern).
    #[must_use]
    pub fn with_unlocked(mut self, unlocked: bool) -> Self {
        self.unlocked = unlocked;
        self
    }

    /// Whether moves are rejected: won, over, or out of time.
    pub fn is_finished(&self) -> bool {
        self.won || self.over || self.time_left_seconds == 0
    }

    /// Whether the clock should stop decrementing.
    pub fn clock_halted(&self) -> bool {
        self.won || self.over
    }

    /// Current clock state.
    pub fn clock_state(&self) -> ClockState {
        ClockState::of(self.time_left_seconds)
    }
}
