//! Random tile insertion.

use crate::core::TileRng;

use super::grid::Board;

/// Where a tile landed and what it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Inserts new tiles into empty cells.
///
/// Picks an empty cell uniformly, then places a 4 with `four_probability` and a
/// 2 otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSpawner {
    four_probability: f64,
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl TileSpawner {
    /// Create a spawner with the given chance of spawning a 4.
    pub fn new(four_probability: f64) -> Self {
        Self { four_probability }
    }

    /// Spawn one tile, returning the new board.
    ///
    /// A full board comes back unchanged.
    pub fn spawn_tile<R: TileRng + ?Sized>(&self, board: &Board, rng: &mut R) -> Board {
        let mut next = *board;
        self.spawn_in_place(&mut next, rng);
        next
    }

    /// Spawn one tile into `board`, reporting where it went.
    ///
    /// Returns `None`, leaving the board untouched, when there is no empty cell.
    pub fn spawn_in_place<R: TileRng + ?Sized>(
        &self,
        board: &mut Board,
        rng: &mut R,
    ) -> Option<Spawned> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[rng.pick_index(empty.len()) % empty.len()];
        let value = if rng.chance(self.four_probability) { 4 } else { 2 };
        board.set(row, col, value);

        Some(Spawned { row, col, value })
    }

    /// An empty board with two tiles spawned into it.
    pub fn fresh_board<R: TileRng + ?Sized>(&self, rng: &mut R) -> Board {
        let mut board = Board::EMPTY;
        self.spawn_in_place(&mut board, rng);
        self.spawn_in_place(&mut board, rng);
        board
    }
}
