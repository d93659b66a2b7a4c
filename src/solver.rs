use log::debug;
use std::cmp::Ordering;

use crate::corner::solve_2x2;
use crate::engine::Move::{Down as D, Left as L, Right as R, Up as U};
use crate::engine::{Board, MoveSequence, Pos};
use crate::error::SolveError;
use crate::lower_rows::{solve_col0_tile, solve_interior_tile};
use crate::top_rows::{solve_row0_tile, solve_row1_tile};

/// Result of solving a copy of a board.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Moves that take the original board to the solved one.
    pub moves: MoveSequence,
    /// The board after all moves were applied; always solved.
    pub final_board: Board,
}

/// Solves `board` in place and returns the moves applied.
///
/// Scans from the bottom-right cell backwards for the first cell that does not hold
/// its solved value. If that cell is below row 1 the blank is walked onto it and the
/// lower rows are finished one tile at a time, right to left and bottom to top.
/// Rows 0 and 1 are then finished two tiles per column, and the remaining 2x2 block
/// last.
///
/// An already solved board yields an empty sequence and is left untouched.
///
/// # Errors
/// - `SolveError::UnsolvableConfiguration` if the arrangement has odd parity. The
///   board is left in its partially solved state.
/// - `SolveError::IllegalMove` or `SolveError::InvariantViolation` if a phase
///   produced a wrong sequence.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::solver::solve_puzzle;
///
/// let mut board = Board::from_rows(vec![
///     vec![3, 1, 2],
///     vec![4, 0, 5],
///     vec![6, 7, 8],
/// ]).unwrap();
/// let moves = solve_puzzle(&mut board).unwrap();
/// assert!(board.is_solved());
/// assert!(!moves.is_empty());
/// ```
pub fn solve_puzzle(board: &mut Board) -> Result<MoveSequence, SolveError> {
    let mut moves = MoveSequence::new();
    let Some(start) = last_unsolved(board) else {
        debug!("board already solved");
        return Ok(moves);
    };
    debug!(
        "solving {}x{} board, last unsolved cell {}",
        board.height(),
        board.width(),
        start
    );

    if start.row > 1 {
        walk_blank(board, start, &mut moves)?;
        solve_lower_rows(board, start, &mut moves)?;
    } else {
        walk_blank(board, Pos::new(1, board.width() - 1), &mut moves)?;
    }

    solve_top_rows(board, &mut moves)?;

    let corner = solve_2x2(board)?;
    debug!("corner solved with {} moves", corner.len());
    moves.append(corner);

    debug!("solved in {} moves", moves.len());
    Ok(moves)
}

/// Solves a copy of `board`, leaving the original untouched.
///
/// # Errors
/// Same as `solve_puzzle`.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::solver::solve;
///
/// let board = Board::from_rows(vec![vec![2, 1], vec![3, 0]]).unwrap();
/// let solution = solve(&board).unwrap();
/// assert_eq!(solution.moves.to_string(), "lu");
/// assert!(solution.final_board.is_solved());
/// assert!(!board.is_solved());
/// ```
pub fn solve(board: &Board) -> Result<Solution, SolveError> {
    let mut final_board = board.clone();
    let moves = solve_puzzle(&mut final_board)?;
    Ok(Solution { moves, final_board })
}

/// Last cell in row-major order whose value is not its solved value.
fn last_unsolved(board: &Board) -> Option<Pos> {
    (0..board.height())
        .rev()
        .flat_map(|row| (0..board.width()).rev().map(move |col| Pos::new(row, col)))
        .find(|&pos| !board.is_solved_at(pos))
}

/// Slides the blank to `target`, horizontally first, then vertically.
///
/// Only used while every cell after `target` in row-major order is solved and the
/// blank is not after it, so the path never crosses a solved cell.
fn walk_blank(board: &mut Board, target: Pos, moves: &mut MoveSequence) -> Result<(), SolveError> {
    let blank = board.blank();
    let mut walk = MoveSequence::new();
    match target.col.cmp(&blank.col) {
        Ordering::Greater => walk.push_n(R, target.col - blank.col),
        Ordering::Less => walk.push_n(L, blank.col - target.col),
        Ordering::Equal => {}
    }
    match target.row.cmp(&blank.row) {
        Ordering::Greater => walk.push_n(D, target.row - blank.row),
        Ordering::Less => walk.push_n(U, blank.row - target.row),
        Ordering::Equal => {}
    }
    board.apply_moves(walk.as_slice())?;
    moves.append(walk);
    Ok(())
}

/// Finishes every row below row 1, starting at `start` with the blank on it.
fn solve_lower_rows(
    board: &mut Board,
    start: Pos,
    moves: &mut MoveSequence,
) -> Result<(), SolveError> {
    let before = moves.len();
    let (mut row, mut col) = (start.row, start.col);
    while row > 1 {
        if col == 0 {
            moves.append(solve_col0_tile(board, row)?);
            row -= 1;
            col = board.width() - 1;
        } else {
            moves.append(solve_interior_tile(board, row, col)?);
            col -= 1;
        }
    }
    debug!("lower rows solved with {} moves", moves.len() - before);
    Ok(())
}

/// Finishes rows 0 and 1 from the rightmost column down to column 2.
fn solve_top_rows(board: &mut Board, moves: &mut MoveSequence) -> Result<(), SolveError> {
    let before = moves.len();
    for col in (2..board.width()).rev() {
        moves.append(solve_row1_tile(board, col)?);
        moves.append(solve_row0_tile(board, col)?);
    }
    debug!("top rows solved with {} moves", moves.len() - before);
    Ok(())
}
