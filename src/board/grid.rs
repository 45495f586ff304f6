//! The 4×4 board and move directions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the board.
pub const SIZE: usize = 4;

/// Raw cell layout, row-major.
pub type Cells = [[u32; SIZE]; SIZE];

/// A direction to slide tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Rejected board data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must be 4x4, found {rows} rows")]
    WrongRowCount { rows: usize },

    #[error("row {row} must have 4 cells, found {cols}")]
    WrongColumnCount { row: usize, cols: usize },

    #[error("cell ({row}, {col}) holds {value}, which is not a power of two")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// A 4×4 grid of tile values. `0` is an empty cell.
///
/// Every non-zero cell is a power of two. Boards built from untrusted data go
/// through [`Board::try_from`], which enforces both the shape and the values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Board(Cells);

impl Board {
    /// A board with every cell empty.
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Build a board from raw cells, validating tile values.
    pub fn from_cells(cells: Cells) -> Result<Self, BoardError> {
        for (row, line) in cells.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Board(cells))
    }

    /// Borrow the raw cells.
    #[inline]
    pub fn cells(&self) -> &Cells {
        &self.0
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    /// Place a tile. Callers inside the crate only ever write powers of two.
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        debug_assert!(is_valid_tile(value));
        self.0[row][col] = value;
    }

    /// Coordinates of empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.0[row][col] == 0 {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Highest tile on the board (0 when empty).
    pub fn max_tile(&self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Non-zero values, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().flatten().copied().filter(|&v| v != 0)
    }
}

#[inline]
fn is_valid_tile(value: u32) -> bool {
    value == 0 || value.is_power_of_two()
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        if rows.len() != SIZE {
            return Err(BoardError::WrongRowCount { rows: rows.len() });
        }
        let mut cells = [[0; SIZE]; SIZE];
        for (row, line) in rows.iter().enumerate() {
            if line.len() != SIZE {
                return Err(BoardError::WrongColumnCount {
                    row,
                    cols: line.len(),
                });
            }
            cells[row].copy_from_slice(line);
        }
        Board::from_cells(cells)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.0.iter().map(|row| row.to_vec()).collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            let line: Vec<String> = row.iter().map(|v| format!("{v:>4}")).collect();
            writeln!(f, "{}", line.join(""))?;
        }
        Ok(())
    }
}
