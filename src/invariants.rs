//! Partial-solution predicates checked at the boundaries of the solver phases.
//!
//! Each predicate states "the blank is where the next step expects it, and every
//! tile placed so far is still in place". They never mutate the board.
use crate::engine::{Board, Pos, BLANK};

fn rows_solved_from(board: &Board, first_row: usize) -> bool {
    (first_row..board.height())
        .all(|row| (0..board.width()).all(|col| board.is_solved_at(Pos::new(row, col))))
}

fn row_solved_from(board: &Board, row: usize, first_col: usize) -> bool {
    (first_col..board.width()).all(|col| board.is_solved_at(Pos::new(row, col)))
}

/// Invariant before placing the tile at `(target_row, target_col)` in the lower rows.
///
/// Holds when:
/// - the blank is at `(target_row, target_col)`,
/// - every row below `target_row` is solved,
/// - every cell of `target_row` right of `target_col` is solved.
///
/// Returns `false` for coordinates outside the board.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::invariants::lower_row_invariant;
///
/// let board = Board::from_rows(vec![
///     vec![4, 1, 2],
///     vec![3, 5, 0],
///     vec![6, 7, 8],
/// ]).unwrap();
/// assert!(lower_row_invariant(&board, 1, 2));
/// assert!(!lower_row_invariant(&board, 2, 2));
/// ```
pub fn lower_row_invariant(board: &Board, target_row: usize, target_col: usize) -> bool {
    if target_row >= board.height() || target_col >= board.width() {
        return false;
    }
    board.get(target_row, target_col) == BLANK
        && rows_solved_from(board, target_row + 1)
        && row_solved_from(board, target_row, target_col + 1)
}

/// Invariant before placing the row-1 tile of column `target_col`.
///
/// The blank is at `(1, target_col)`, rows 2 and below are solved, and rows 0 and 1
/// are solved right of `target_col`.
pub fn row1_invariant(board: &Board, target_col: usize) -> bool {
    if target_col >= board.width() {
        return false;
    }
    board.get(1, target_col) == BLANK
        && rows_solved_from(board, 2)
        && row_solved_from(board, 0, target_col + 1)
        && row_solved_from(board, 1, target_col + 1)
}

/// Invariant before placing the row-0 tile of column `target_col`.
///
/// Like `row1_invariant`, but with the blank at `(0, target_col)` and row 1 solved from
/// `target_col` rightward, since the row-1 tile of this column is already in place.
pub fn row0_invariant(board: &Board, target_col: usize) -> bool {
    if target_col >= board.width() {
        return false;
    }
    board.get(0, target_col) == BLANK
        && rows_solved_from(board, 2)
        && row_solved_from(board, 0, target_col + 1)
        && row_solved_from(board, 1, target_col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_lower_row_invariant_holds() {
        let b = board(&[
            &[3, 1, 2, 8],
            &[4, 5, 6, 7],
            &[9, 10, 0, 11],
            &[12, 13, 14, 15],
        ]);
        assert!(lower_row_invariant(&b, 2, 2));
    }

    #[test]
    fn test_lower_row_invariant_requires_blank_at_target() {
        let b = board(&[
            &[3, 1, 2, 8],
            &[4, 5, 6, 7],
            &[9, 10, 0, 11],
            &[12, 13, 14, 15],
        ]);
        assert!(!lower_row_invariant(&b, 2, 1));
        assert!(!lower_row_invariant(&b, 3, 3));
    }

    #[test]
    fn test_lower_row_invariant_detects_unsolved_cells() {
        // (3, 0) and (3, 1) swapped below the target row
        let b = board(&[
            &[3, 1, 2, 8],
            &[4, 5, 6, 7],
            &[9, 10, 0, 11],
            &[13, 12, 14, 15],
        ]);
        assert!(!lower_row_invariant(&b, 2, 2));

        // the cell right of the target is wrong
        let b = board(&[
            &[3, 1, 2, 11],
            &[4, 5, 6, 7],
            &[9, 10, 0, 8],
            &[12, 13, 14, 15],
        ]);
        assert!(!lower_row_invariant(&b, 2, 2));
    }

    #[test]
    fn test_lower_row_invariant_out_of_bounds() {
        let b = Board::new(3, 3).unwrap();
        assert!(!lower_row_invariant(&b, 3, 0));
        assert!(!lower_row_invariant(&b, 0, 3));
        assert!(lower_row_invariant(&b, 0, 0));
    }

    #[test]
    fn test_row1_invariant() {
        let b = board(&[
            &[5, 4, 2, 3],
            &[1, 0, 6, 7],
            &[8, 9, 10, 11],
            &[12, 13, 14, 15],
        ]);
        assert!(row1_invariant(&b, 1));
        assert!(!row1_invariant(&b, 2));
        assert!(!row0_invariant(&b, 1));
    }

    #[test]
    fn test_row1_invariant_requires_row0_tail() {
        let b = board(&[
            &[5, 4, 3, 2],
            &[1, 0, 6, 7],
            &[8, 9, 10, 11],
            &[12, 13, 14, 15],
        ]);
        assert!(!row1_invariant(&b, 1));
    }

    #[test]
    fn test_row0_invariant() {
        let b = board(&[
            &[2, 5, 0, 3],
            &[1, 4, 6, 7],
            &[8, 9, 10, 11],
            &[12, 13, 14, 15],
        ]);
        assert!(row0_invariant(&b, 2));
        assert!(!row1_invariant(&b, 2));

        // row 1 must be solved from the target column rightward
        let b = board(&[
            &[2, 5, 0, 3],
            &[1, 6, 4, 7],
            &[8, 9, 10, 11],
            &[12, 13, 14, 15],
        ]);
        assert!(!row0_invariant(&b, 2));
    }

    #[test]
    fn test_top_row_invariants_require_lower_rows() {
        let b = board(&[
            &[2, 5, 0, 3],
            &[1, 4, 6, 7],
            &[8, 9, 11, 10],
            &[12, 13, 14, 15],
        ]);
        assert!(!row0_invariant(&b, 2));
    }
}
