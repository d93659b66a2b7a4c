//! Phase two: rows 0 and 1, once everything below them is solved.
//!
//! Columns are finished right to left in pairs: first the row-1 tile, then the
//! row-0 tile above it. The phase stops at column 1, leaving the top-left 2x2 block
//! for the corner step.
use log::trace;
use std::cmp::Ordering;

use crate::engine::Move::{self, Down as D, Left as L, Right as R, Up as U};
use crate::engine::{Board, MoveSequence, Pos};
use crate::error::SolveError;
use crate::invariants::{row0_invariant, row1_invariant};
use crate::patterns::{SHIFT_RIGHT_VIA_ABOVE, SHIFT_RIGHT_VIA_BELOW};

/// Lifts a tile staged at `(1, c - 1)`, with the blank left of it, into `(0, c)` and
/// leaves the blank at `(1, c - 1)`. Touches columns `c - 2` through `c` only.
const ROW0_CLOSE: [Move; 17] = [U, R, D, L, U, R, R, D, L, U, L, D, R, R, U, L, D];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Row1Case {
    /// In row 1, `left` columns left of the blank.
    SameRow { left: usize },
    /// Directly above the blank.
    Above,
    /// In row 0, `left` columns left of the target column.
    UpperLeft { left: usize },
}

impl Row1Case {
    fn classify(target_col: usize, tile: Pos) -> Option<Self> {
        match (tile.row, tile.col.cmp(&target_col)) {
            (1, Ordering::Less) => Some(Row1Case::SameRow {
                left: target_col - tile.col,
            }),
            (0, Ordering::Equal) => Some(Row1Case::Above),
            (0, Ordering::Less) => Some(Row1Case::UpperLeft {
                left: target_col - tile.col,
            }),
            _ => None,
        }
    }

    /// Moves that place the tile and leave the blank above it at `(0, target_col)`.
    fn moves(self) -> MoveSequence {
        let mut moves = MoveSequence::new();
        match self {
            Row1Case::SameRow { left } => {
                moves.push_n(L, left);
                moves.repeat_pattern(&SHIFT_RIGHT_VIA_ABOVE, left - 1);
                moves.extend_pattern(&[U, R]);
            }
            Row1Case::Above => moves.push(U),
            Row1Case::UpperLeft { left } => {
                moves.push(U);
                moves.push_n(L, left);
                moves.repeat_pattern(&SHIFT_RIGHT_VIA_BELOW, left - 1);
                moves.extend_pattern(&[D, R, U]);
            }
        }
        moves
    }
}

/// Where the row-0 tile sits after the opening `ld`, which leaves the blank at
/// `(1, target_col - 1)`.
///
/// A tile starting directly left of the target needs no case of its own: the
/// opening `l` slides it into place, so it is classified as `Dropped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Row0Case {
    /// The opening `l` already slid the tile into its target.
    Dropped,
    /// Directly above the blank.
    AboveBlank,
    /// In row 1, `left` columns left of the blank.
    LowerRow { left: usize },
    /// In row 0, `left` columns left of the cell above the blank.
    UpperRow { left: usize },
}

impl Row0Case {
    fn classify(target_col: usize, tile: Pos) -> Option<Self> {
        if tile == Pos::new(0, target_col) {
            return Some(Row0Case::Dropped);
        }
        let staging_col = target_col - 1;
        match (tile.row, tile.col.cmp(&staging_col)) {
            (0, Ordering::Equal) => Some(Row0Case::AboveBlank),
            (1, Ordering::Less) => Some(Row0Case::LowerRow {
                left: staging_col - tile.col,
            }),
            (0, Ordering::Less) => Some(Row0Case::UpperRow {
                left: staging_col - tile.col,
            }),
            _ => None,
        }
    }

    /// Moves that stage the tile at `(1, target_col - 1)` with the blank left of it,
    /// followed by the closing lift. Empty for `Dropped`.
    fn moves(self) -> MoveSequence {
        let mut moves = MoveSequence::new();
        match self {
            Row0Case::Dropped => return moves,
            Row0Case::AboveBlank => moves.extend_pattern(&[U, L, D]),
            Row0Case::LowerRow { left } => {
                moves.push_n(L, left);
                moves.repeat_pattern(&SHIFT_RIGHT_VIA_ABOVE, left - 1);
            }
            Row0Case::UpperRow { left } => {
                moves.push_n(L, left);
                moves.extend_pattern(&[U, R, D, L]);
                moves.repeat_pattern(&SHIFT_RIGHT_VIA_ABOVE, left - 1);
            }
        }
        moves.extend_pattern(&ROW0_CLOSE);
        moves
    }
}

/// Places the correct tile at `(1, target_col)` for `target_col > 1`.
///
/// Requires `row1_invariant(target_col)`; afterwards `row0_invariant(target_col)`
/// holds.
///
/// # Errors
/// `SolveError::InvariantViolation` if the column is out of range or the invariant
/// does not hold.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::invariants::row0_invariant;
/// use fifteen_solver::top_rows::solve_row1_tile;
///
/// let mut board = Board::from_rows(vec![
///     vec![1, 2, 5],
///     vec![3, 4, 0],
///     vec![6, 7, 8],
/// ]).unwrap();
/// let moves = solve_row1_tile(&mut board, 2).unwrap();
/// assert_eq!(moves.to_string(), "u");
/// assert!(row0_invariant(&board, 2));
/// ```
pub fn solve_row1_tile(board: &mut Board, target_col: usize) -> Result<MoveSequence, SolveError> {
    if target_col < 2 || !row1_invariant(board, target_col) {
        return Err(SolveError::InvariantViolation(format!(
            "row-1 step at column {} called without its invariant",
            target_col
        )));
    }

    let target = Pos::new(1, target_col);
    let tile = board.current_position(target);
    let case = Row1Case::classify(target_col, tile).ok_or_else(|| {
        SolveError::InvariantViolation(format!(
            "tile for {} found at {}, outside the unsolved region",
            target, tile
        ))
    })?;
    trace!("row 1 {}: tile at {}, {:?}", target, tile, case);

    let moves = case.moves();
    board.apply_moves(moves.as_slice())?;
    Ok(moves)
}

/// Places the correct tile at `(0, target_col)` for `target_col > 1`.
///
/// Requires `row0_invariant(target_col)`; afterwards `row1_invariant(target_col - 1)`
/// holds.
///
/// # Errors
/// Same as `solve_row1_tile`.
pub fn solve_row0_tile(board: &mut Board, target_col: usize) -> Result<MoveSequence, SolveError> {
    if target_col < 2 || !row0_invariant(board, target_col) {
        return Err(SolveError::InvariantViolation(format!(
            "row-0 step at column {} called without its invariant",
            target_col
        )));
    }

    let mut moves = MoveSequence::new();
    moves.extend_pattern(&[L, D]);
    board.apply_moves(moves.as_slice())?;

    let target = Pos::new(0, target_col);
    let tile = board.current_position(target);
    let case = Row0Case::classify(target_col, tile).ok_or_else(|| {
        SolveError::InvariantViolation(format!(
            "tile for {} found at {} after the opening moves",
            target, tile
        ))
    })?;
    trace!("row 0 {}: tile at {}, {:?}", target, tile, case);

    let rest = case.moves();
    board.apply_moves(rest.as_slice())?;
    moves.append(rest);
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    /// Three-row board with a solved bottom row, the blank at `blank`, tile `tile_value`
    /// at `tile` and every cell in `solved_cells` holding its solved value. The other
    /// cells are filled with the remaining values in order.
    fn strip(
        width: usize,
        blank: Pos,
        tile_value: u32,
        tile: Pos,
        solved_cells: Vec<Pos>,
    ) -> Board {
        let mut rows = vec![vec![u32::MAX; width]; 3];
        for col in 0..width {
            rows[2][col] = (2 * width + col) as u32;
        }
        for pos in &solved_cells {
            rows[pos.row][pos.col] = (pos.col + width * pos.row) as u32;
        }
        rows[blank.row][blank.col] = 0;
        rows[tile.row][tile.col] = tile_value;

        let mut used: Vec<u32> = rows.iter().flatten().copied().collect();
        used.retain(|&v| v != u32::MAX);
        let mut spare = (1..(2 * width) as u32).filter(|v| !used.contains(v));
        for cell in rows.iter_mut().flatten() {
            if *cell == u32::MAX {
                *cell = spare.next().unwrap();
            }
        }
        Board::from_rows(rows).unwrap()
    }

    fn row1_solved(width: usize, target_col: usize) -> Vec<Pos> {
        (target_col + 1..width)
            .flat_map(|col| [Pos::new(0, col), Pos::new(1, col)])
            .collect()
    }

    fn row0_solved(width: usize, target_col: usize) -> Vec<Pos> {
        let mut cells = row1_solved(width, target_col);
        cells.push(Pos::new(1, target_col));
        cells
    }

    #[test]
    fn test_row1_tile_every_source_cell() {
        let width = 5;
        let target_col = 3;
        let tile_value = (width + target_col) as u32;
        for row in 0..2 {
            for col in 0..=target_col {
                let tile = Pos::new(row, col);
                if tile == Pos::new(1, target_col) {
                    continue;
                }
                let mut b = strip(
                    width,
                    Pos::new(1, target_col),
                    tile_value,
                    tile,
                    row1_solved(width, target_col),
                );
                assert!(row1_invariant(&b, target_col));
                let moves = solve_row1_tile(&mut b, target_col).unwrap();
                assert!(
                    row0_invariant(&b, target_col),
                    "tile from {} failed with {}:\n{}",
                    tile,
                    moves,
                    b
                );
            }
        }
    }

    #[test]
    fn test_row0_tile_every_source_cell() {
        let width = 5;
        let target_col = 3;
        let tile_value = target_col as u32;
        for row in 0..2 {
            for col in 0..target_col {
                let tile = Pos::new(row, col);
                let mut b = strip(
                    width,
                    Pos::new(0, target_col),
                    tile_value,
                    tile,
                    row0_solved(width, target_col),
                );
                assert!(row0_invariant(&b, target_col));
                let moves = solve_row0_tile(&mut b, target_col).unwrap();
                assert!(
                    row1_invariant(&b, target_col - 1),
                    "tile from {} failed with {}:\n{}",
                    tile,
                    moves,
                    b
                );
            }
        }
    }

    #[test]
    fn test_row0_tile_dropped_by_opening_move() {
        // tile 3 starts directly left of its target
        let mut b = board(&[
            &[1, 4, 3, 0],
            &[2, 5, 6, 7],
            &[8, 9, 10, 11],
        ]);
        let moves = solve_row0_tile(&mut b, 3).unwrap();
        assert_eq!(moves.to_string(), "ld");
        assert!(row1_invariant(&b, 2));
    }

    #[test]
    fn test_row0_tile_uses_closing_sequence() {
        let mut b = board(&[
            &[3, 1, 4, 0],
            &[2, 5, 6, 7],
            &[8, 9, 10, 11],
        ]);
        let moves = solve_row0_tile(&mut b, 3).unwrap();
        assert!(moves.to_string().ends_with("urdlurrdluldrruld"));
        assert!(row1_invariant(&b, 2));
    }

    #[test]
    fn test_top_row_steps_require_invariants() {
        let mut b = Board::new(3, 4).unwrap();
        assert!(matches!(
            solve_row1_tile(&mut b, 3),
            Err(SolveError::InvariantViolation(_))
        ));
        assert!(matches!(
            solve_row0_tile(&mut b, 3),
            Err(SolveError::InvariantViolation(_))
        ));
        assert!(matches!(
            solve_row1_tile(&mut b, 1),
            Err(SolveError::InvariantViolation(_))
        ));
    }
}
