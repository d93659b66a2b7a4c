//! Fixed move patterns shared by the solver phases.
//!
//! The `SHIFT_*` rotations each move a tile one column sideways while the blank
//! circles around it through the row above or below, and leave the blank on the
//! far side of the tile ready for the next repetition.
use crate::engine::Move::{self, Down as D, Left as L, Right as R, Up as U};
use crate::engine::MoveSequence;

/// Blank left of the tile: carries the tile one column right through the row above.
pub const SHIFT_RIGHT_VIA_ABOVE: [Move; 5] = [U, R, R, D, L];

/// Blank left of the tile: carries the tile one column right through the row below.
pub const SHIFT_RIGHT_VIA_BELOW: [Move; 5] = [D, R, R, U, L];

/// Blank right of the tile: carries the tile one column left through the row below.
pub const SHIFT_LEFT_VIA_BELOW: [Move; 5] = [D, L, L, U, R];

/// Blank right of the tile: carries the tile one column left through the row above.
pub const SHIFT_LEFT_VIA_ABOVE: [Move; 5] = [U, L, L, D, R];

/// Which column the blank loops through while walking a tile downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownCycleSide {
    Left,
    Right,
}

impl DownCycleSide {
    fn rotation(self) -> [Move; 5] {
        match self {
            DownCycleSide::Left => [L, D, D, R, U],
            DownCycleSide::Right => [R, D, D, L, U],
        }
    }
}

/// Appends the moves that walk a tile down a column.
///
/// Expects the tile directly below the blank. Each rotation moves the tile one row
/// down with the blank ending above it again; `count - 1` rotations are emitted, then
/// `ld` parks the blank directly left of the tile.
pub fn down_cycle(moves: &mut MoveSequence, count: usize, side: DownCycleSide) {
    moves.repeat_pattern(&side.rotation(), count.saturating_sub(1));
    moves.extend_pattern(&[L, D]);
}
