//! Directional slide-and-merge.
//!
//! Every direction is handled by one routine: rotate the board so the move
//! becomes "left", compact each row, then rotate back.
//!
//! | direction | before       | after        |
//! |-----------|--------------|--------------|
//! | Left      | none         | none         |
//! | Up        | rotate left  | rotate right |
//! | Right     | rotate twice | rotate twice |
//! | Down      | rotate right | rotate left  |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::{Board, Cells, Direction, SIZE};
use super::rotate::{rotate_left, rotate_right};

/// Result of sliding a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The board after sliding, before any spawn.
    pub board: Board,
    /// Whether any cell changed.
    pub moved: bool,
    /// Whether a merge produced exactly the win value.
    pub reached_win_value: bool,
}

/// Slide `board` in `direction`, merging equal neighbours.
///
/// Pure and deterministic. A tile produced by a merge does not merge again in
/// the same move, so `[2, 2, 2, 2]` moved left becomes `[4, 4, 0, 0]`.
pub fn apply_move(board: &Board, direction: Direction, win_value: u32) -> MoveOutcome {
    let oriented = orient(board.cells(), direction);

    let mut compacted = [[0; SIZE]; SIZE];
    let mut reached_win_value = false;
    for (out, row) in compacted.iter_mut().zip(oriented.iter()) {
        let (merged, reached) = slide_row_left(row, win_value);
        *out = merged;
        reached_win_value |= reached;
    }

    // Merging powers of two yields powers of two, so the shape invariant holds.
    let result = Board::from_cells(restore(&compacted, direction)).unwrap_or(*board);

    MoveOutcome {
        moved: result != *board,
        board: result,
        reached_win_value,
    }
}

/// Whether `direction` would change the board.
pub fn can_move(board: &Board, direction: Direction) -> bool {
    apply_move(board, direction, 0).moved
}

/// Compact one row toward index 0, merging adjacent equal pairs once.
///
/// Returns the new row and whether any merge produced `win_value`.
pub fn slide_row_left(row: &[u32; SIZE], win_value: u32) -> ([u32; SIZE], bool) {
    let mut tiles: SmallVec<[u32; SIZE]> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut reached = false;

    let mut i = 0;
    while i + 1 < tiles.len() {
        if tiles[i] == tiles[i + 1] {
            // The largest u32 power of two cannot double.
            if let Some(merged) = tiles[i].checked_mul(2) {
                tiles[i] = merged;
                tiles[i + 1] = 0;
                reached |= merged == win_value;
                // The consumed cell is empty; skip past it.
                i += 2;
                continue;
            }
        }
        i += 1;
    }

    let mut out = [0; SIZE];
    for (slot, value) in out.iter_mut().zip(tiles.into_iter().filter(|&v| v != 0)) {
        *slot = value;
    }
    (out, reached)
}

fn orient(cells: &Cells, direction: Direction) -> Cells {
    match direction {
        Direction::Left => *cells,
        Direction::Up => rotate_left(cells),
        Direction::Right => rotate_left(&rotate_left(cells)),
        Direction::Down => rotate_right(cells),
    }
}

fn restore(cells: &Cells, direction: Direction) -> Cells {
    match direction {
        Direction::Left => *cells,
        Direction::Up => rotate_right(cells),
        Direction::Right => rotate_left(&rotate_left(cells)),
        Direction::Down => rotate_left(cells),
    }
}
