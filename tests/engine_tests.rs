//! Board engine property tests.
//!
//! These tests check the slide/merge rules and rotations over arbitrary
//! boards, and the move-then-spawn conservation law.

use proptest::prelude::*;

use tile256::board::{apply_move, rotate_left, rotate_right, Board, Cells, Direction, TileSpawner};
use tile256::core::GameRng;

/// Cells are empty or a power of two up to 256.
fn cell() -> impl Strategy<Value = u32> {
    (0u32..=8).prop_map(|exp| if exp == 0 { 0 } else { 1 << exp })
}

fn cells() -> impl Strategy<Value = Cells> {
    proptest::array::uniform4(proptest::array::uniform4(cell()))
}

fn board() -> impl Strategy<Value = Board> {
    cells().prop_map(|c| Board::from_cells(c).unwrap())
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn sum(board: &Board) -> u64 {
    board.tiles().map(u64::from).sum()
}

/// Line `i` of the board read from the wall the tiles slide toward.
fn line(board: &Board, dir: Direction, i: usize) -> [u32; 4] {
    let mut out = [0; 4];
    for (j, slot) in out.iter_mut().enumerate() {
        *slot = match dir {
            Direction::Left => board.get(i, j),
            Direction::Right => board.get(i, 3 - j),
            Direction::Up => board.get(j, i),
            Direction::Down => board.get(3 - j, i),
        };
    }
    out
}

/// Tiles of a line after one slide: equal neighbours pair up from the wall,
/// each tile merging at most once.
fn merged_once(line: &[u32; 4]) -> Vec<u32> {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out.push(tiles[i] * 2);
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }
    out
}

proptest! {
    #[test]
    fn rotations_are_inverse(grid in cells()) {
        prop_assert_eq!(rotate_right(&rotate_left(&grid)), grid);
        prop_assert_eq!(rotate_left(&rotate_right(&grid)), grid);
    }

    #[test]
    fn unmoved_board_is_a_fixed_point(b in board(), dir in direction()) {
        let outcome = apply_move(&b, dir, 256);
        if !outcome.moved {
            prop_assert_eq!(outcome.board, b);
        }
        // Repeating the same slide settles within a few moves: each repeat
        // must merge at least once, and a row holds at most three merges.
        let mut current = outcome.board;
        for _ in 0..4 {
            current = apply_move(&current, dir, 256).board;
        }
        let settled = apply_move(&current, dir, 256);
        prop_assert!(!settled.moved);
        prop_assert_eq!(settled.board, current);
    }

    #[test]
    fn moved_flag_matches_board_change(b in board(), dir in direction()) {
        let outcome = apply_move(&b, dir, 256);
        prop_assert_eq!(outcome.moved, outcome.board != b);
    }

    #[test]
    fn slide_conserves_tile_sum(b in board(), dir in direction()) {
        let outcome = apply_move(&b, dir, 256);
        prop_assert_eq!(sum(&outcome.board), sum(&b));
        prop_assert!(outcome.board.tiles().count() <= b.tiles().count());
        prop_assert!(outcome.board.tiles().all(|v| v.is_power_of_two()));
    }

    #[test]
    fn slide_merges_each_pair_once(b in board(), dir in direction()) {
        let outcome = apply_move(&b, dir, 256);

        let mut expected_all = Vec::new();
        for i in 0..4 {
            let expected = merged_once(&line(&b, dir, i));
            let after = line(&outcome.board, dir, i);

            // Tiles sit against the wall in order, followed by empty cells
            prop_assert_eq!(&after[..expected.len()], expected.as_slice());
            prop_assert!(after[expected.len()..].iter().all(|&v| v == 0));
            expected_all.extend(expected);
        }

        let mut actual_all: Vec<u32> = outcome.board.tiles().collect();
        expected_all.sort_unstable();
        actual_all.sort_unstable();
        prop_assert_eq!(actual_all, expected_all);
    }

    #[test]
    fn move_then_spawn_adds_exactly_one_tile(b in board(), dir in direction(), seed in any::<u64>()) {
        let outcome = apply_move(&b, dir, 256);
        let spawner = TileSpawner::default();
        let mut rng = GameRng::new(seed);

        if outcome.moved {
            let spawned = spawner.spawn_tile(&outcome.board, &mut rng);
            let added = sum(&spawned) - sum(&outcome.board);
            prop_assert!(added == 2 || added == 4);
            prop_assert_eq!(spawned.tiles().count(), outcome.board.tiles().count() + 1);
            prop_assert_eq!(sum(&spawned), sum(&b) + added);
        } else {
            prop_assert_eq!(outcome.board, b);
        }
    }

    #[test]
    fn win_flag_requires_win_tile(b in board(), dir in direction()) {
        let outcome = apply_move(&b, dir, 256);
        if outcome.reached_win_value {
            prop_assert!(outcome.board.tiles().any(|v| v == 256));
        }
    }
}

/// Moving left merges a pair and leaves the rest of the board empty.
#[test]
fn test_scenario_pair_merges_left() {
    let start = Board::from_cells([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();

    let outcome = apply_move(&start, Direction::Left, 256);
    assert!(outcome.moved);
    assert_eq!(outcome.board.cells()[0], [4, 0, 0, 0]);

    let spawned = TileSpawner::default().spawn_tile(&outcome.board, &mut GameRng::new(5));
    assert_eq!(spawned.tiles().count(), 2);
    assert_eq!(spawned.get(0, 0), 4);
}

/// Four equal tiles merge pairwise, never into one.
#[test]
fn test_no_chain_merge_in_any_direction() {
    let row = Board::from_cells([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    assert_eq!(apply_move(&row, Direction::Left, 256).board.cells()[0], [4, 4, 0, 0]);
    assert_eq!(apply_move(&row, Direction::Right, 256).board.cells()[0], [0, 0, 4, 4]);

    let column = Board::from_cells([[8, 0, 0, 0], [8, 0, 0, 0], [8, 0, 0, 0], [8, 0, 0, 0]]).unwrap();
    let up = apply_move(&column, Direction::Up, 256).board;
    assert_eq!((up.get(0, 0), up.get(1, 0), up.get(2, 0)), (16, 16, 0));
}

/// A packed board with no equal neighbours cannot move anywhere.
#[test]
fn test_packed_board_is_stuck() {
    let packed = Board::from_cells([
        [2, 4, 8, 16],
        [16, 8, 4, 2],
        [2, 4, 8, 16],
        [16, 8, 4, 2],
    ])
    .unwrap();

    for direction in Direction::ALL {
        let outcome = apply_move(&packed, direction, 256);
        assert!(!outcome.moved, "{direction} should be blocked");
        assert_eq!(outcome.board, packed);
    }
}
