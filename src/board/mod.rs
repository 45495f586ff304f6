//! Board engine: the grid, rotations, slide/merge and tile spawning.
//!
//! Everything here is pure except the spawner, which draws from an injected
//! [`TileRng`](crate::core::TileRng).

pub mod grid;
pub mod rotate;
pub mod slide;
pub mod spawn;

pub use grid::{Board, BoardError, Cells, Direction, SIZE};
pub use rotate::{rotate_left, rotate_right};
pub use slide::{apply_move, can_move, slide_row_left, MoveOutcome};
pub use spawn::{Spawned, TileSpawner};
