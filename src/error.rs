//! Error type shared by the board model, the solver phases and the serialized boundary.
use thiserror::Error;

use crate::engine::Move;

/// Everything that can go wrong while building, moving or solving a board.
///
/// `IllegalMove` and `InvariantViolation` never surface for a validated board
/// when the moves come from the solver itself; if they do, a phase produced a
/// wrong sequence and the error must be reported rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A move would slide the blank off the grid.
    #[error("illegal move '{mv}' with the blank at ({row}, {col})")]
    IllegalMove { mv: Move, row: usize, col: usize },

    /// The supplied arrangement, dimensions or move tokens are malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The final 2x2 block holds an odd permutation, which blank slides cannot undo.
    /// Carries the corner values at (0, 0), (0, 1) and (1, 0).
    #[error("unsolvable configuration: corner holds {0:?}")]
    UnsolvableConfiguration([u32; 3]),

    /// A phase step found its tile somewhere its entry invariant rules out.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
