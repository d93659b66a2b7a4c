//! Phase three: the top-left 2x2 block.
//!
//! With the blank at `(1, 1)` and everything else solved, the three remaining tiles
//! can only be cycled around the block. Exactly three of their six arrangements are
//! reachable; the other three are an odd permutation of the whole board.
use log::trace;

use crate::engine::Move::{self, Down as D, Left as L, Right as R, Up as U};
use crate::engine::{Board, MoveSequence};
use crate::error::SolveError;
use crate::invariants::row1_invariant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CornerCase {
    /// Solved after one counterclockwise turn of the blank.
    OneTurnUp,
    /// Solved after one clockwise turn of the blank.
    OneTurnLeft,
    /// Needs one and a half turns.
    TwoTurns,
}

impl CornerCase {
    /// Classifies the values at `(0, 0)`, `(0, 1)` and `(1, 0)` on a board of `width`.
    fn classify(width: u32, corner: [u32; 3]) -> Option<Self> {
        let (top_right, bottom_left, bottom_right) = (1, width, width + 1);
        if corner == [top_right, bottom_right, bottom_left] {
            Some(CornerCase::OneTurnUp)
        } else if corner == [bottom_left, top_right, bottom_right] {
            Some(CornerCase::OneTurnLeft)
        } else if corner == [bottom_right, bottom_left, top_right] {
            Some(CornerCase::TwoTurns)
        } else {
            None
        }
    }

    fn moves(self) -> &'static [Move] {
        match self {
            CornerCase::OneTurnUp => &[U, L],
            CornerCase::OneTurnLeft => &[L, U],
            CornerCase::TwoTurns => &[L, U, R, D, L, U],
        }
    }
}

/// Solves the top-left 2x2 block, leaving the blank at `(0, 0)`.
///
/// # Errors
/// - `SolveError::InvariantViolation` if the blank is not at `(1, 1)` or any cell
///   outside the block is unsolved.
/// - `SolveError::UnsolvableConfiguration` if the block holds one of the three
///   unreachable arrangements. The board is left untouched in that case.
///
/// # Examples
/// ```
/// use fifteen_solver::corner::solve_2x2;
/// use fifteen_solver::engine::Board;
///
/// let mut board = Board::from_rows(vec![vec![1, 3], vec![2, 0]]).unwrap();
/// assert_eq!(solve_2x2(&mut board).unwrap().to_string(), "ul");
/// assert!(board.is_solved());
/// ```
pub fn solve_2x2(board: &mut Board) -> Result<MoveSequence, SolveError> {
    if !row1_invariant(board, 1) {
        return Err(SolveError::InvariantViolation(
            "corner step called without the blank at (1, 1) and the rest solved".to_string(),
        ));
    }

    let corner = [board.get(0, 0), board.get(0, 1), board.get(1, 0)];
    let width = board.width() as u32;
    let case = CornerCase::classify(width, corner)
        .ok_or(SolveError::UnsolvableConfiguration(corner))?;
    trace!("corner {:?}: {:?}", corner, case);

    let moves = MoveSequence::from(case.moves().to_vec());
    board.apply_moves(moves.as_slice())?;
    Ok(moves)
}
