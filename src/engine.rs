//! Board model for the sliding-tile puzzle.
//!
//! This module defines the pieces every solver phase works with:
//! - `Move`: one slide of the blank, written `u`, `d`, `l` or `r` on the wire.
//! - `MoveSequence`: an ordered list of moves that phases build and concatenate.
//! - `Pos`: a (row, column) coordinate on the board.
//! - `Board`: the H×W grid of numbered tiles with the blank (`0`), including the
//!   move applier that every emitted sequence goes through.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::SolveError;

/// The value that marks the blank cell.
pub const BLANK: u32 = 0;

/// Smallest supported height and width. The corner phase needs a 2x2 block to work on.
pub const MIN_SIZE: usize = 2;

/// Side length of the board used by the reference deployment (the classic 4x4 "fifteen").
pub const DEFAULT_SIZE: usize = 4;

/// How many moves of each direction `Board::scrambled` draws before shuffling them.
pub const SCRAMBLE_MOVES_PER_DIRECTION: RangeInclusive<usize> = 50..=100;

/// A single slide of the blank by one cell.
///
/// Moving the blank in a direction swaps it with the neighbouring tile on that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in wire-token order `u`, `d`, `l`, `r`.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Converts the move to its single-character wire token.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifteen_solver::engine::Move;
    /// assert_eq!(Move::Up.to_char(), 'u');
    /// assert_eq!(Move::Right.to_char(), 'r');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Move::Up => 'u',
            Move::Down => 'd',
            Move::Left => 'l',
            Move::Right => 'r',
        }
    }

    /// Parses a wire token. Returns `None` for anything outside `u`, `d`, `l`, `r`.
    pub fn from_char(token: char) -> Option<Move> {
        match token {
            'u' => Some(Move::Up),
            'd' => Some(Move::Down),
            'l' => Some(Move::Left),
            'r' => Some(Move::Right),
            _ => None,
        }
    }

    /// Row and column delta of the blank for this move.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An ordered list of blank moves.
///
/// The solver phases assemble their output with the builder methods
/// (`push_n` for straight slides, `repeat_pattern` for rotation cycles) and
/// the orchestrator concatenates the per-step sequences with `append`.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::{Move, MoveSequence};
///
/// let mut moves = MoveSequence::new();
/// moves.push_n(Move::Left, 2);
/// moves.repeat_pattern(&[Move::Up, Move::Right, Move::Right, Move::Down, Move::Left], 1);
/// assert_eq!(moves.to_string(), "llurrdl");
///
/// let parsed: MoveSequence = "llurrdl".parse().unwrap();
/// assert_eq!(parsed, moves);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence {
    moves: Vec<Move>,
}

impl MoveSequence {
    pub fn new() -> Self {
        MoveSequence { moves: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn into_vec(self) -> Vec<Move> {
        self.moves
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Appends `count` copies of `mv`, i.e. a straight slide of the blank.
    pub fn push_n(&mut self, mv: Move, count: usize) {
        self.moves.extend(std::iter::repeat(mv).take(count));
    }

    /// Appends a fixed pattern once.
    pub fn extend_pattern(&mut self, pattern: &[Move]) {
        self.moves.extend_from_slice(pattern);
    }

    /// Appends `pattern` `count` times. A `count` of zero appends nothing.
    pub fn repeat_pattern(&mut self, pattern: &[Move], count: usize) {
        for _ in 0..count {
            self.moves.extend_from_slice(pattern);
        }
    }

    /// Moves every move of `other` onto the end of this sequence.
    pub fn append(&mut self, mut other: MoveSequence) {
        self.moves.append(&mut other.moves);
    }

    /// The sequence as single-character tokens, the shape the serialized boundary returns.
    pub fn tokens(&self) -> Vec<String> {
        self.moves.iter().map(|mv| mv.to_char().to_string()).collect()
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        MoveSequence { moves }
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.moves {
            write!(f, "{}", mv.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for MoveSequence {
    type Err = SolveError;

    /// Parses a token string such as `"rrdlu"`. Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Move::from_char(c).ok_or_else(|| {
                    SolveError::InvalidInput(format!("unrecognized move token '{}'", c))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(MoveSequence::from)
    }
}

/// A (row, column) coordinate. Row 0 is the top row, column 0 the leftmost column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Checks that a board of the given dimensions is large enough for the solver phases.
pub fn validate_dimensions(height: usize, width: usize) -> Result<(), SolveError> {
    if height < MIN_SIZE || width < MIN_SIZE {
        return Err(SolveError::InvalidInput(format!(
            "board must be at least {}x{}, got {}x{}",
            MIN_SIZE, MIN_SIZE, height, width
        )));
    }
    Ok(())
}

/// The puzzle grid: every value in `0..height * width` exactly once, `0` being the blank.
///
/// The board tracks where the blank is so that applying a move is O(1). Every other
/// lookup (`position_of`, `current_position`) is a plain scan of the grid, which is
/// cheap at puzzle sizes.
///
/// A board is solved when `cell(row, col) == col + width * row` everywhere, which
/// puts the blank in the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    grid: Vec<Vec<u32>>,
    blank: Pos,
}

impl Board {
    /// Creates a solved board of the given dimensions.
    ///
    /// # Errors
    /// `SolveError::InvalidInput` if either dimension is below `MIN_SIZE`.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Board;
    /// let board = Board::new(3, 4).unwrap();
    /// assert!(board.is_solved());
    /// assert_eq!(board.get(2, 3), 11);
    /// assert!(Board::new(1, 4).is_err());
    /// ```
    pub fn new(height: usize, width: usize) -> Result<Self, SolveError> {
        validate_dimensions(height, width)?;
        let grid = (0..height)
            .map(|row| (0..width).map(|col| (col + width * row) as u32).collect())
            .collect();
        Ok(Board {
            height,
            width,
            grid,
            blank: Pos::new(0, 0),
        })
    }

    /// Builds a board from caller-supplied rows, validating the arrangement.
    ///
    /// The height is the number of rows and the width the length of the first row.
    ///
    /// # Errors
    /// `SolveError::InvalidInput` if the board is smaller than `MIN_SIZE` in either
    /// direction, the rows have different lengths, a value is outside
    /// `0..height * width`, or a value appears more than once.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::{Board, Pos};
    /// let board = Board::from_rows(vec![vec![1, 0], vec![2, 3]]).unwrap();
    /// assert_eq!(board.blank(), Pos::new(0, 1));
    ///
    /// assert!(Board::from_rows(vec![vec![1, 1], vec![2, 3]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, SolveError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        validate_dimensions(height, width)?;

        let cell_count = height * width;
        let mut seen = vec![false; cell_count];
        let mut blank = None;

        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SolveError::InvalidInput(format!(
                    "row {} has {} values, expected {}",
                    r,
                    row.len(),
                    width
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                let index = value as usize;
                if index >= cell_count {
                    return Err(SolveError::InvalidInput(format!(
                        "value {} at ({}, {}) is outside 0..{}",
                        value, r, c, cell_count
                    )));
                }
                if seen[index] {
                    return Err(SolveError::InvalidInput(format!(
                        "value {} appears more than once",
                        value
                    )));
                }
                seen[index] = true;
                if value == BLANK {
                    blank = Some(Pos::new(r, c));
                }
            }
        }

        // Every in-range value was seen exactly once, so the blank is present.
        let blank = blank.ok_or_else(|| SolveError::InvalidInput("no blank tile".to_string()))?;

        Ok(Board {
            height,
            width,
            grid: rows,
            blank,
        })
    }

    /// Creates a random, always-solvable board by scrambling the solved one.
    ///
    /// Draws between 50 and 100 moves of each direction, shuffles them, and applies
    /// them in order from the solved board, skipping any that would leave the grid.
    /// The same seed always yields the same board.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Board;
    /// let a = Board::scrambled(4, 4, 7).unwrap();
    /// let b = Board::scrambled(4, 4, 7).unwrap();
    /// assert_eq!(a, b);
    /// assert!(a.is_solvable());
    /// ```
    pub fn scrambled(height: usize, width: usize, seed: u64) -> Result<Self, SolveError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut moves = Vec::new();
        for mv in Move::ALL {
            let count = rng.gen_range(SCRAMBLE_MOVES_PER_DIRECTION);
            moves.extend(std::iter::repeat(mv).take(count));
        }
        moves.shuffle(&mut rng);

        let mut board = Board::new(height, width)?;
        for mv in moves {
            if board.can_move(mv) {
                board.apply_move(mv)?;
            }
        }
        Ok(board)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.grid[row][col]
    }

    pub fn at(&self, pos: Pos) -> u32 {
        self.grid[pos.row][pos.col]
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.grid
    }

    /// Current position of the blank.
    pub fn blank(&self) -> Pos {
        self.blank
    }

    /// The value that belongs at `pos` once the board is solved.
    pub fn solved_value(&self, pos: Pos) -> u32 {
        (pos.col + self.width * pos.row) as u32
    }

    pub fn is_solved_at(&self, pos: Pos) -> bool {
        self.at(pos) == self.solved_value(pos)
    }

    pub fn is_solved(&self) -> bool {
        (0..self.height).all(|row| (0..self.width).all(|col| self.is_solved_at(Pos::new(row, col))))
    }

    /// Scans the grid for `value`.
    pub fn position_of(&self, value: u32) -> Option<Pos> {
        self.grid.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&cell| cell == value)
                .map(|col| Pos::new(row, col))
        })
    }

    /// Where the tile that belongs at `solved` currently sits.
    pub fn current_position(&self, solved: Pos) -> Pos {
        let value = self.solved_value(solved);
        self.position_of(value)
            .unwrap_or_else(|| unreachable!("tile {} missing from a validated board", value))
    }

    /// The cell next to `pos` in the direction of `mv`, if it is on the board.
    pub fn neighbor(&self, pos: Pos, mv: Move) -> Option<Pos> {
        let (dr, dc) = mv.offset();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.height && col < self.width).then_some(Pos::new(row, col))
    }

    /// Whether the blank can slide in direction `mv` without leaving the grid.
    pub fn can_move(&self, mv: Move) -> bool {
        self.neighbor(self.blank, mv).is_some()
    }

    /// Slides the blank one cell in direction `mv`.
    ///
    /// # Errors
    /// `SolveError::IllegalMove` if the blank would leave the grid; the board is unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), SolveError> {
        let target = self.neighbor(self.blank, mv).ok_or(SolveError::IllegalMove {
            mv,
            row: self.blank.row,
            col: self.blank.col,
        })?;
        self.grid[self.blank.row][self.blank.col] = self.grid[target.row][target.col];
        self.grid[target.row][target.col] = BLANK;
        self.blank = target;
        Ok(())
    }

    /// Applies `moves` in order.
    ///
    /// # Errors
    /// Stops at the first illegal move and returns `SolveError::IllegalMove`. Moves
    /// before it stay applied.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::{Board, MoveSequence};
    /// let mut board = Board::new(2, 2).unwrap();
    /// let moves: MoveSequence = "rdlu".parse().unwrap();
    /// board.apply_moves(moves.as_slice()).unwrap();
    /// assert_eq!(board.rows(), &[vec![0, 3], vec![1, 2]][..]);
    /// assert!(board.apply_moves(&"uu".parse::<MoveSequence>().unwrap().into_vec()).is_err());
    /// ```
    pub fn apply_moves(&mut self, moves: &[Move]) -> Result<(), SolveError> {
        for &mv in moves {
            self.apply_move(mv)?;
        }
        Ok(())
    }

    /// Whether blank slides can bring this arrangement to the solved board.
    ///
    /// Each slide is one transposition and moves the blank by one cell, so the
    /// permutation parity must match the parity of the blank's distance from
    /// its solved cell (the top-left corner).
    pub fn is_solvable(&self) -> bool {
        let cells: Vec<usize> = self.grid.iter().flatten().map(|&v| v as usize).collect();
        let mut visited = vec![false; cells.len()];
        let mut transpositions = 0;
        for start in 0..cells.len() {
            if visited[start] {
                continue;
            }
            let mut cycle_len = 0;
            let mut index = start;
            while !visited[index] {
                visited[index] = true;
                index = cells[index];
                cycle_len += 1;
            }
            transpositions += cycle_len - 1;
        }
        (transpositions + self.blank.row + self.blank.col) % 2 == 0
    }
}

impl fmt::Display for Board {
    /// Right-aligned columns, one row per line, the blank shown as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = (self.height * self.width - 1).to_string().len();
        for (r, row) in self.grid.iter().enumerate() {
            let line = row
                .iter()
                .map(|&v| {
                    if v == BLANK {
                        format!("{:>w$}", ".", w = cell_width)
                    } else {
                        format!("{:>w$}", v, w = cell_width)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line)?;
            if r + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_4x4() -> Board {
        Board::new(4, 4).unwrap()
    }

    #[test]
    fn test_new_board_is_solved() {
        let board = Board::new(3, 5).unwrap();
        assert!(board.is_solved());
        assert_eq!(board.blank(), Pos::new(0, 0));
        assert_eq!(board.height(), 3);
        assert_eq!(board.width(), 5);
        for r in 0..3 {
            for c in 0..5 {
                assert_eq!(board.get(r, c), (c + 5 * r) as u32);
            }
        }
    }

    #[test]
    fn test_new_rejects_small_dimensions() {
        assert!(matches!(Board::new(1, 4), Err(SolveError::InvalidInput(_))));
        assert!(matches!(Board::new(4, 1), Err(SolveError::InvalidInput(_))));
        assert!(Board::new(2, 2).is_ok());
    }

    #[test]
    fn test_from_rows_validation() {
        // duplicate
        let err = Board::from_rows(vec![vec![0, 1], vec![1, 3]]).unwrap_err();
        assert!(err.to_string().contains("more than once"));

        // out of range
        let err = Board::from_rows(vec![vec![0, 1], vec![2, 4]]).unwrap_err();
        assert!(err.to_string().contains("outside 0..4"));

        // ragged
        let err = Board::from_rows(vec![vec![0, 1, 2], vec![3, 4]]).unwrap_err();
        assert!(err.to_string().contains("row 1 has 2 values"));

        // too small
        assert!(Board::from_rows(vec![vec![0, 1, 2]]).is_err());
        assert!(Board::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_from_rows_tracks_blank() {
        let board = Board::from_rows(vec![vec![3, 1, 2], vec![4, 0, 5]]).unwrap();
        assert_eq!(board.blank(), Pos::new(1, 1));
        assert!(!board.is_solved());
        assert_eq!(board.position_of(3), Some(Pos::new(0, 0)));
        // the tile for (1, 0) is 3, which sits in the top-left corner
        assert_eq!(board.current_position(Pos::new(1, 0)), Pos::new(0, 0));
        assert_eq!(board.current_position(Pos::new(0, 0)), Pos::new(1, 1));
    }

    #[test]
    fn test_apply_move_each_direction() {
        let mut board = solved_4x4();
        board.apply_move(Move::Right).unwrap();
        assert_eq!(board.get(0, 0), 1);
        assert_eq!(board.blank(), Pos::new(0, 1));
        board.apply_move(Move::Down).unwrap();
        assert_eq!(board.get(0, 1), 5);
        assert_eq!(board.blank(), Pos::new(1, 1));
        board.apply_move(Move::Left).unwrap();
        assert_eq!(board.get(1, 1), 4);
        board.apply_move(Move::Up).unwrap();
        assert_eq!(board.blank(), Pos::new(0, 0));
        assert_eq!(board.rows()[0], vec![0, 5, 2, 3]);
        assert_eq!(board.rows()[1], vec![1, 4, 6, 7]);
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let mut board = solved_4x4();
        let before = board.clone();
        assert_eq!(
            board.apply_move(Move::Up),
            Err(SolveError::IllegalMove {
                mv: Move::Up,
                row: 0,
                col: 0
            })
        );
        assert_eq!(
            board.apply_move(Move::Left),
            Err(SolveError::IllegalMove {
                mv: Move::Left,
                row: 0,
                col: 0
            })
        );
        assert_eq!(board, before);

        let mut board = Board::from_rows(vec![vec![1, 2], vec![3, 0]]).unwrap();
        assert!(board.apply_move(Move::Down).is_err());
        assert!(board.apply_move(Move::Right).is_err());
    }

    #[test]
    fn test_apply_moves_stops_at_first_illegal_move() {
        let mut board = solved_4x4();
        let moves: MoveSequence = "rrrrd".parse().unwrap();
        let err = board.apply_moves(moves.as_slice()).unwrap_err();
        assert_eq!(
            err,
            SolveError::IllegalMove {
                mv: Move::Right,
                row: 0,
                col: 3
            }
        );
        // the three legal moves before it are kept
        assert_eq!(board.blank(), Pos::new(0, 3));
    }

    #[test]
    fn test_move_sequence_parse_and_display() {
        let moves: MoveSequence = "ur dl".parse().unwrap();
        assert_eq!(
            moves.as_slice(),
            &[Move::Up, Move::Right, Move::Down, Move::Left]
        );
        assert_eq!(moves.to_string(), "urdl");
        assert_eq!(moves.tokens(), vec!["u", "r", "d", "l"]);

        let err = "urx".parse::<MoveSequence>().unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_move_sequence_builders() {
        let mut moves = MoveSequence::new();
        moves.push_n(Move::Up, 3);
        moves.repeat_pattern(&[Move::Left, Move::Down], 2);
        moves.repeat_pattern(&[Move::Right], 0);
        moves.extend_pattern(&[Move::Right]);
        assert_eq!(moves.to_string(), "uuuldldr");

        let mut tail = MoveSequence::new();
        tail.push(Move::Down);
        moves.append(tail);
        assert_eq!(moves.len(), 9);
        assert_eq!(moves.iter().last(), Some(&Move::Down));
    }

    #[test]
    fn test_move_opposite_round_trip() {
        let mut board = Board::scrambled(3, 3, 11).unwrap();
        let start = board.clone();
        for mv in Move::ALL {
            if board.can_move(mv) {
                board.apply_move(mv).unwrap();
                board.apply_move(mv.opposite()).unwrap();
                assert_eq!(board, start);
            }
        }
    }

    #[test]
    fn test_scrambled_determinism_and_solvability() {
        let a = Board::scrambled(4, 4, 123).unwrap();
        let b = Board::scrambled(4, 4, 123).unwrap();
        let c = Board::scrambled(4, 4, 124).unwrap();
        assert_eq!(a, b, "Boards with the same seed must be identical.");
        assert_ne!(a, c, "Boards with different seeds should differ.");
        assert!(a.is_solvable());
        assert!(c.is_solvable());
    }

    #[test]
    fn test_is_solvable_parity() {
        assert!(solved_4x4().is_solvable());

        // swapping two numbered tiles flips the parity
        let swapped = Board::from_rows(vec![
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![8, 9, 10, 11],
            vec![12, 13, 15, 14],
        ])
        .unwrap();
        assert!(!swapped.is_solvable());

        // a single blank slide is always reachable
        let slid = Board::from_rows(vec![vec![1, 0], vec![2, 3]]).unwrap();
        assert!(slid.is_solvable());
    }

    #[test]
    fn test_display_board_formatting() {
        let board = Board::from_rows(vec![
            vec![1, 0, 2, 3],
            vec![4, 5, 6, 7],
            vec![8, 9, 10, 11],
            vec![12, 13, 14, 15],
        ])
        .unwrap();
        let display_str = format!("{}", board);
        let lines: Vec<&str> = display_str.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], " 1  .  2  3");
        assert_eq!(lines[3], "12 13 14 15");
    }
}
