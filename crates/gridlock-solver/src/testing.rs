//! Shared fixtures and assertions for tests and benches.

use gridlock_core::{Position, ValueSet};

use crate::{Board, Puzzle};

/// Givens of a 9×9 layout with a unique solution, as `(x, y, value)`
/// triples.
pub const EASY_GIVENS: [(u8, u8, u8); 39] = [
    (0, 0, 6),
    (2, 0, 3),
    (3, 0, 2),
    (4, 0, 4),
    (8, 0, 1),
    (0, 1, 4),
    (1, 1, 1),
    (2, 1, 5),
    (5, 1, 7),
    (7, 1, 2),
    (8, 1, 3),
    (1, 2, 2),
    (6, 2, 4),
    (0, 3, 1),
    (5, 3, 4),
    (6, 3, 5),
    (8, 3, 2),
    (0, 4, 3),
    (2, 4, 6),
    (4, 4, 1),
    (6, 4, 9),
    (8, 4, 7),
    (0, 5, 5),
    (2, 5, 2),
    (3, 5, 8),
    (8, 5, 4),
    (2, 6, 1),
    (7, 6, 4),
    (0, 7, 2),
    (1, 7, 5),
    (3, 7, 3),
    (6, 7, 7),
    (7, 7, 1),
    (8, 7, 8),
    (0, 8, 7),
    (4, 8, 2),
    (5, 8, 1),
    (6, 8, 3),
    (8, 8, 9),
];

/// Builds a 9×9 puzzle pre-filled with [`EASY_GIVENS`].
///
/// # Panics
///
/// Panics if a given cannot be assigned; the fixture is consistent, so that
/// indicates a propagation defect.
#[must_use]
pub fn easy_puzzle() -> Puzzle {
    let mut puzzle = Puzzle::new(9).expect("9 is a valid board size");
    for (x, y, value) in EASY_GIVENS {
        puzzle
            .set_cell_value(x, y, value)
            .expect("fixture givens are consistent");
    }
    puzzle
}

/// Asserts that every cell of `board` is assigned and that every row,
/// column, and box is a permutation of `1..=size`.
///
/// # Panics
///
/// Panics with the offending block when the board is not a valid solution.
#[track_caller]
pub fn assert_solved(board: &Board) {
    let size = board.size();
    let box_dim = board.box_dimension();
    let expected = ValueSet::full(size);

    for y in 0..size {
        let values = block_values(board, (0..size).map(|x| Position::new(x, y)));
        assert_eq!(values, expected, "row {y} is not a permutation of 1..={size}");
    }
    for x in 0..size {
        let values = block_values(board, (0..size).map(|y| Position::new(x, y)));
        assert_eq!(values, expected, "column {x} is not a permutation of 1..={size}");
    }
    for by in (0..size).step_by(usize::from(box_dim)) {
        for bx in (0..size).step_by(usize::from(box_dim)) {
            let values = block_values(
                board,
                (0..box_dim).flat_map(|dx| {
                    (0..box_dim).map(move |dy| Position::new(bx + dx, by + dy))
                }),
            );
            assert_eq!(
                values, expected,
                "box at ({bx}, {by}) is not a permutation of 1..={size}",
            );
        }
    }
}

#[track_caller]
fn block_values(board: &Board, positions: impl Iterator<Item = Position>) -> ValueSet {
    positions
        .map(|pos| {
            board
                .cell(pos)
                .expect("position within bounds")
                .value()
                .unwrap_or_else(|| panic!("cell {pos} is unassigned"))
        })
        .collect()
}
