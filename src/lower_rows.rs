//! Phase one: every row below the top two.
//!
//! Rows are solved bottom-up and each row right to left. Interior cells
//! (column > 0) are filled by `solve_interior_tile`; the leftmost cell of a row
//! needs the separate staging maneuver in `solve_col0_tile`. Every step starts
//! from `lower_row_invariant` at its target and ends in the invariant of the
//! next target.
use log::trace;
use std::cmp::Ordering;

use crate::engine::Move::{self, Down as D, Left as L, Right as R, Up as U};
use crate::engine::{Board, MoveSequence, Pos};
use crate::error::SolveError;
use crate::invariants::lower_row_invariant;
use crate::patterns::{
    down_cycle, DownCycleSide, SHIFT_LEFT_VIA_ABOVE, SHIFT_LEFT_VIA_BELOW,
    SHIFT_RIGHT_VIA_ABOVE, SHIFT_RIGHT_VIA_BELOW,
};

/// Drops a tile staged right of the blank, one row above its column-zero target,
/// into column zero. Only columns 0 and 1 of three rows are touched.
const COLUMN_ZERO_DROP: [Move; 19] = [R, U, L, D, R, D, L, U, R, D, L, U, U, R, D, D, L, U, R];

/// Where the tile for an interior target sits relative to that target.
///
/// `lower_row_invariant` leaves only these placements possible: the tile is either
/// left of the blank in the target row, or somewhere in a row above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InteriorCase {
    /// Same row, `left` columns to the left.
    SameRow { left: usize },
    /// Same column, `up` rows above.
    Above { up: usize },
    /// Right of the target column and at least two rows above.
    UpperRight { up: usize, right: usize },
    /// Right of the target column, exactly one row above.
    AdjacentUpperRight { right: usize },
    /// Left of the target column and at least two rows above.
    UpperLeft { up: usize, left: usize },
    /// Left of the target column, exactly one row above.
    AdjacentUpperLeft { left: usize },
}

impl InteriorCase {
    fn classify(target: Pos, tile: Pos) -> Option<Self> {
        let case = match (tile.row.cmp(&target.row), tile.col.cmp(&target.col)) {
            (Ordering::Equal, Ordering::Less) => InteriorCase::SameRow {
                left: target.col - tile.col,
            },
            (Ordering::Less, Ordering::Equal) => InteriorCase::Above {
                up: target.row - tile.row,
            },
            (Ordering::Less, Ordering::Greater) => {
                let up = target.row - tile.row;
                let right = tile.col - target.col;
                if up >= 2 {
                    InteriorCase::UpperRight { up, right }
                } else {
                    InteriorCase::AdjacentUpperRight { right }
                }
            }
            (Ordering::Less, Ordering::Less) => {
                let up = target.row - tile.row;
                let left = target.col - tile.col;
                if up >= 2 {
                    InteriorCase::UpperLeft { up, left }
                } else {
                    InteriorCase::AdjacentUpperLeft { left }
                }
            }
            // the blank is on the target, and everything after it is solved
            (Ordering::Equal, Ordering::Equal)
            | (Ordering::Equal, Ordering::Greater)
            | (Ordering::Greater, _) => return None,
        };
        Some(case)
    }

    /// Moves that bring the tile onto the target and leave the blank directly left of it.
    fn moves(self) -> MoveSequence {
        let mut moves = MoveSequence::new();
        match self {
            InteriorCase::SameRow { left } => {
                moves.push_n(L, left);
                moves.repeat_pattern(&SHIFT_RIGHT_VIA_ABOVE, left - 1);
            }
            InteriorCase::Above { up } => {
                moves.push_n(U, up);
                down_cycle(&mut moves, up, DownCycleSide::Left);
            }
            InteriorCase::UpperRight { up, right } => {
                moves.push_n(U, up);
                moves.push_n(R, right);
                moves.repeat_pattern(&SHIFT_LEFT_VIA_BELOW, right - 1);
                moves.extend_pattern(&[D, L, U]);
                down_cycle(&mut moves, up, DownCycleSide::Left);
            }
            InteriorCase::AdjacentUpperRight { right } => {
                // the row below the tile is solved right of the target, so loop above it
                moves.push(U);
                moves.push_n(R, right);
                moves.repeat_pattern(&SHIFT_LEFT_VIA_ABOVE, right - 1);
                moves.extend_pattern(&[U, L, L, D, D, R, U, L, D]);
            }
            InteriorCase::UpperLeft { up, left } => {
                moves.push_n(U, up);
                moves.push_n(L, left);
                moves.repeat_pattern(&SHIFT_RIGHT_VIA_BELOW, left - 1);
                moves.extend_pattern(&[D, R, U]);
                down_cycle(&mut moves, up, DownCycleSide::Left);
            }
            InteriorCase::AdjacentUpperLeft { left } => {
                // pull the tile down into the target row first, then shift it right
                moves.push_n(L, left);
                moves.extend_pattern(&[U, R, D, L]);
                moves.repeat_pattern(&SHIFT_RIGHT_VIA_ABOVE, left - 1);
            }
        }
        moves
    }
}

/// Places the correct tile at `(target_row, target_col)`, where `target_row > 1` and
/// `target_col > 0`.
///
/// Requires `lower_row_invariant(target_row, target_col)`; afterwards
/// `lower_row_invariant(target_row, target_col - 1)` holds. The board is updated and
/// the exact sequence applied is returned.
///
/// # Errors
/// `SolveError::InvariantViolation` if the target is not an interior lower-row cell
/// or its invariant does not hold. `SolveError::IllegalMove` would indicate a defect
/// in the case table.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::invariants::lower_row_invariant;
/// use fifteen_solver::lower_rows::solve_interior_tile;
///
/// let mut board = Board::from_rows(vec![
///     vec![4, 1, 2],
///     vec![3, 5, 8],
///     vec![6, 7, 0],
/// ]).unwrap();
/// let moves = solve_interior_tile(&mut board, 2, 2).unwrap();
/// assert_eq!(moves.to_string(), "uld");
/// assert!(lower_row_invariant(&board, 2, 1));
/// ```
pub fn solve_interior_tile(
    board: &mut Board,
    target_row: usize,
    target_col: usize,
) -> Result<MoveSequence, SolveError> {
    if target_row < 2 || target_col == 0 || !lower_row_invariant(board, target_row, target_col) {
        return Err(SolveError::InvariantViolation(format!(
            "interior step at ({}, {}) called without its lower-row invariant",
            target_row, target_col
        )));
    }

    let target = Pos::new(target_row, target_col);
    let tile = board.current_position(target);
    let case = InteriorCase::classify(target, tile).ok_or_else(|| {
        SolveError::InvariantViolation(format!(
            "tile for {} found at {}, outside the unsolved region",
            target, tile
        ))
    })?;
    trace!("interior {}: tile at {}, {:?}", target, tile, case);

    let moves = case.moves();
    board.apply_moves(moves.as_slice())?;
    Ok(moves)
}

/// Where the column-zero tile sits after the opening `ur`, which leaves the blank at
/// `(target_row - 1, 1)`. All but `Dropped` stage the tile at `(target_row - 1, 1)`
/// with the blank at `(target_row - 1, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColumnZeroCase {
    /// The opening `u` already slid the tile into its target.
    Dropped,
    /// The tile is in column zero of the staging row, directly left of the blank.
    LeftOfBlank,
    /// The tile is in the staging row, `right` columns right of the blank.
    StagingRowRight { right: usize },
    /// The tile is in column one, `up` rows above the blank.
    Above { up: usize },
    /// The tile is in column zero, `up` rows above the staging row.
    AboveLeft { up: usize },
    /// The tile is `up` rows above and `right` columns right of the blank.
    AboveRight { up: usize, right: usize },
}

impl ColumnZeroCase {
    fn classify(target_row: usize, tile: Pos) -> Option<Self> {
        if tile == Pos::new(target_row, 0) {
            return Some(ColumnZeroCase::Dropped);
        }
        let staging_row = target_row - 1;
        let case = match (tile.row.cmp(&staging_row), tile.col) {
            (Ordering::Equal, 0) => ColumnZeroCase::LeftOfBlank,
            // the blank sits there after `ur`
            (Ordering::Equal, 1) => return None,
            (Ordering::Equal, col) => ColumnZeroCase::StagingRowRight { right: col - 1 },
            (Ordering::Less, 0) => ColumnZeroCase::AboveLeft {
                up: staging_row - tile.row,
            },
            (Ordering::Less, 1) => ColumnZeroCase::Above {
                up: staging_row - tile.row,
            },
            (Ordering::Less, col) => ColumnZeroCase::AboveRight {
                up: staging_row - tile.row,
                right: col - 1,
            },
            (Ordering::Greater, _) => return None,
        };
        Some(case)
    }

    /// Staging moves followed by the column-zero drop; empty for `Dropped`.
    fn moves(self, side: DownCycleSide) -> MoveSequence {
        let mut moves = MoveSequence::new();
        match self {
            ColumnZeroCase::Dropped => return moves,
            ColumnZeroCase::LeftOfBlank => moves.push(L),
            ColumnZeroCase::StagingRowRight { right } => {
                moves.push_n(R, right);
                moves.repeat_pattern(&SHIFT_LEFT_VIA_ABOVE, right - 1);
                moves.extend_pattern(&[U, L, L, D]);
            }
            ColumnZeroCase::Above { up } => {
                moves.push_n(U, up);
                down_cycle(&mut moves, up, side);
            }
            ColumnZeroCase::AboveLeft { up } => {
                moves.push_n(U, up);
                moves.extend_pattern(&[L, D, R, U]);
                down_cycle(&mut moves, up, side);
            }
            ColumnZeroCase::AboveRight { up, right } => {
                moves.push_n(U, up);
                moves.push_n(R, right);
                moves.repeat_pattern(&SHIFT_LEFT_VIA_BELOW, right - 1);
                moves.extend_pattern(&[D, L, U]);
                down_cycle(&mut moves, up, side);
            }
        }
        moves.extend_pattern(&COLUMN_ZERO_DROP);
        moves
    }
}

/// Places the correct tile at `(target_row, 0)` for `target_row > 1`.
///
/// Requires `lower_row_invariant(target_row, 0)`. Opens with `ur`; unless that
/// already dropped the tile into place, stages it right of the blank one row up and
/// drops it with a fixed 3x2 maneuver. Ends by walking the blank to the rightmost
/// column of the row above, so `lower_row_invariant(target_row - 1, width - 1)` holds.
///
/// # Errors
/// Same as `solve_interior_tile`.
pub fn solve_col0_tile(board: &mut Board, target_row: usize) -> Result<MoveSequence, SolveError> {
    if target_row < 2 || !lower_row_invariant(board, target_row, 0) {
        return Err(SolveError::InvariantViolation(format!(
            "column-zero step in row {} called without its lower-row invariant",
            target_row
        )));
    }

    let mut moves = MoveSequence::new();
    moves.extend_pattern(&[U, R]);
    board.apply_moves(moves.as_slice())?;

    let target = Pos::new(target_row, 0);
    let tile = board.current_position(target);
    let case = ColumnZeroCase::classify(target_row, tile).ok_or_else(|| {
        SolveError::InvariantViolation(format!(
            "tile for {} found at {} after the opening moves",
            target, tile
        ))
    })?;
    trace!("column zero {}: tile at {}, {:?}", target, tile, case);

    // two-column boards have no room for the right-hand loop
    let side = if board.width() > 2 {
        DownCycleSide::Right
    } else {
        DownCycleSide::Left
    };
    let mut rest = case.moves(side);
    rest.push_n(R, board.width() - 2);
    board.apply_moves(rest.as_slice())?;

    moves.append(rest);
    Ok(moves)
}
